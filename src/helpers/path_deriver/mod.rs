/// Disk-image suffixes stripped from the file name, most specific first.
const DISK_IMAGE_SUFFIXES: &[&str] = &["-disk1.img", ".img"];

/// Kernel and initrd locations that conventionally sit next to a disk image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionPaths {
    pub kernel: String,
    pub initrd: String,
}

/// Derive the `unpacked/` kernel and initrd paths for `image_location`.
///
/// The manifest never lists these files; the result is a naming convention
/// and the targets may not exist on the mirror.
///
/// ```ignore
/// let paths = derive_companion_paths("server/releases/bionic/release-20180509/ubuntu-18.04-server-cloudimg-amd64.img");
/// assert_eq!(paths.kernel, "server/releases/bionic/release-20180509/unpacked/ubuntu-18.04-server-cloudimg-amd64-vmlinuz-generic");
/// ```
pub fn derive_companion_paths(image_location: &str) -> CompanionPaths {
    let (dir, file_name) = match image_location.rsplit_once('/') {
        Some((dir, file_name)) => (dir, file_name),
        None => (".", image_location),
    };

    let stem = DISK_IMAGE_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .unwrap_or(file_name);

    let prefix = format!("{dir}/unpacked/{stem}");

    CompanionPaths {
        kernel: format!("{prefix}-vmlinuz-generic"),
        initrd: format!("{prefix}-initrd-generic"),
    }
}
