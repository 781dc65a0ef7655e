use crate::cloud::Version;
use crate::helpers::path_deriver::derive_companion_paths;

/// Item holding the combined image consumed by container-style backends.
const COMBINED_ITEM: &str = "lxd.tar.xz";

/// Checksum fields of the combined item, in order of preference.
const COMBINED_CHECKSUM_KEYS: &[&str] = &["combined_disk-kvm-img_sha256", "combined_disk1-img_sha256"];

/// Item holding the generic disk image.
const DISK_ITEM: &str = "disk1.img";

/// Backend that consumes combined images.
const COMBINED_BACKEND: &str = "lxd";

/// How artifacts are read out of a version, chosen by the active backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// One combined image; the version is skipped until its checksum is published.
    CombinedImage,
    /// A disk image plus the conventional kernel/initrd next to it.
    GenericDisk,
}

/// Artifact fields one policy contributes to an image record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Artifact {
    pub image_location: String,
    pub kernel_location: String,
    pub initrd_location: String,
    pub checksum: String,
    pub size_bytes: i64,
}

impl ExtractionPolicy {
    pub fn for_backend(backend: &str) -> Self {
        match backend {
            COMBINED_BACKEND => ExtractionPolicy::CombinedImage,
            _ => ExtractionPolicy::GenericDisk,
        }
    }

    /// `None` means the version is not usable with this policy yet.
    pub(crate) fn extract(&self, version: &Version<'_>) -> Option<Artifact> {
        match self {
            ExtractionPolicy::CombinedImage => extract_combined(version),
            ExtractionPolicy::GenericDisk => Some(extract_disk(version)),
        }
    }
}

fn extract_combined(version: &Version<'_>) -> Option<Artifact> {
    let image = version.item(COMBINED_ITEM);

    // The first field present decides, even if it turns out empty.
    let key = COMBINED_CHECKSUM_KEYS.iter().find(|key| image.contains(key))?;
    let checksum = image.text(key);
    if checksum.is_empty() {
        return None;
    }

    Some(Artifact {
        image_location: String::new(),
        kernel_location: String::new(),
        initrd_location: String::new(),
        checksum: checksum.to_string(),
        size_bytes: -1,
    })
}

fn extract_disk(version: &Version<'_>) -> Artifact {
    let image = version.item(DISK_ITEM);
    let image_location = image.path();
    let companions = derive_companion_paths(image_location);

    Artifact {
        image_location: image_location.to_string(),
        kernel_location: companions.kernel,
        initrd_location: companions.initrd,
        checksum: image.sha256().to_string(),
        size_bytes: image.size(),
    }
}
