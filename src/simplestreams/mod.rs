//! Resolution of a Simplestreams manifest into an indexed [`Catalog`].
//!
//! The manifest is untrusted input. Products built for another architecture,
//! products without versions, versions without items and versions the active
//! backend cannot use yet are skipped silently; everything else that goes wrong
//! aborts the whole resolution.

pub mod parser;
pub mod policy;

use tracing::{debug, info};

pub use parser::{RawDocument, parse};
pub use policy::ExtractionPolicy;

use crate::cloud::{Catalog, ImageRecord};
use crate::helpers::{arch_mapper::to_catalog_arch, latest_of};
use crate::settings::{DRIVER_KEY, Settings, SettingsError};

/// OS reported for products that do not name one.
const DEFAULT_OS: &str = "Ubuntu";

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("failed to parse manifest: {0}")]
    Parse(String),
    #[error("invalid manifest object")]
    InvalidFormat,
    #[error("{0}")]
    EmptyManifest(String),
    #[error("unsupported cloud image architecture: {0}")]
    UnsupportedArchitecture(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Resolve `bytes` for `host_arch`, using the backend configured in `settings`.
///
/// `host_url` is stamped on every record as its [`ImageRecord::source_host`].
pub fn resolve(
    bytes: &[u8],
    host_url: &str,
    host_arch: &str,
    settings: &dyn Settings,
) -> Result<Catalog, ManifestError> {
    let backend = settings.get(DRIVER_KEY)?;
    resolve_with_policy(bytes, host_url, host_arch, ExtractionPolicy::for_backend(&backend))
}

/// Same as [`resolve`] with the extraction policy already chosen.
pub fn resolve_with_policy(
    bytes: &[u8],
    host_url: &str,
    host_arch: &str,
    policy: ExtractionPolicy,
) -> Result<Catalog, ManifestError> {
    let document = parse(bytes)?;

    if !document.has_products() {
        return Err(ManifestError::EmptyManifest("No products found".to_string()));
    }

    let arch = to_catalog_arch(host_arch)
        .ok_or_else(|| ManifestError::UnsupportedArchitecture(host_arch.to_string()))?;

    let mut records = Vec::new();

    for (product_id, product) in document.products() {
        if product.arch() != arch {
            debug!(product = product_id, arch = product.arch(), "skipping product for another architecture");
            continue;
        }

        if !product.has_versions() {
            debug!(product = product_id, "skipping product without versions");
            continue;
        }

        let Some(latest) = latest_of(product.versions().map(|(id, _)| id)) else {
            continue;
        };

        let aliases = product.aliases();
        let os = product.os().unwrap_or(DEFAULT_OS);

        for (version_id, version) in product.versions() {
            if !version.has_items() {
                debug!(product = product_id, version = version_id, "skipping version without items");
                continue;
            }

            let Some(artifact) = policy.extract(&version) else {
                debug!(
                    product = product_id,
                    version = version_id,
                    ?policy,
                    "skipping version not published for this backend"
                );
                continue;
            };

            // Aliases always point at the latest version
            let record_aliases = if version_id == latest {
                aliases.clone()
            } else {
                Vec::new()
            };

            records.push(ImageRecord {
                aliases: record_aliases,
                os: os.to_string(),
                release: product.release().to_string(),
                release_title: product.release_title().to_string(),
                supported: product.supported(),
                image_location: artifact.image_location,
                kernel_location: artifact.kernel_location,
                initrd_location: artifact.initrd_location,
                checksum: artifact.checksum,
                source_host: host_url.to_string(),
                version_id: version_id.to_string(),
                size_bytes: artifact.size_bytes,
                complete: true,
            });
        }
    }

    if records.is_empty() {
        return Err(ManifestError::EmptyManifest(
            "No supported products found.".to_string(),
        ));
    }

    info!(records = records.len(), arch, ?policy, "resolved manifest");

    Ok(Catalog::new(document.updated().to_string(), records))
}

#[cfg(test)]
mod tests {
    use super::{ExtractionPolicy, ManifestError, resolve, resolve_with_policy};
    use crate::settings::{DRIVER_KEY, SettingsError, StaticSettings};

    const HOST: &str = "https://cloud-images.ubuntu.com/releases/";

    fn manifest() -> &'static [u8] {
        br#"{
            "updated": "Wed, 09 May 2018 17:27:53 +0000",
            "products": {
                "com.ubuntu.cloud:server:18.04:amd64": {
                    "aliases": "18.04,b,bionic,lts",
                    "arch": "amd64",
                    "os": "ubuntu",
                    "release": "bionic",
                    "release_title": "18.04 LTS",
                    "supported": true,
                    "versions": {
                        "20180505": {
                            "items": {
                                "disk1.img": { "path": "server/releases/bionic/release-20180505/ubuntu-18.04-server-cloudimg-amd64.img", "sha256": "older", "size": 100 }
                            }
                        },
                        "20180509": {
                            "items": {
                                "disk1.img": { "path": "server/releases/bionic/release-20180509/ubuntu-18.04-server-cloudimg-amd64.img", "sha256": "newer", "size": 200 },
                                "lxd.tar.xz": { "combined_disk1-img_sha256": "combined" }
                            }
                        }
                    }
                },
                "com.ubuntu.cloud:server:18.04:arm64": {
                    "aliases": "18.04,b,bionic,lts",
                    "arch": "arm64",
                    "release": "bionic",
                    "versions": {
                        "20180509": { "items": { "disk1.img": { "path": "arm.img", "sha256": "arm" } } }
                    }
                }
            }
        }"#
    }

    #[test]
    fn generic_disk_records_every_version() {
        let catalog =
            resolve_with_policy(manifest(), HOST, "x86_64", ExtractionPolicy::GenericDisk).unwrap();

        assert_eq!(catalog.updated_at(), "Wed, 09 May 2018 17:27:53 +0000");
        assert_eq!(catalog.len(), 2);

        let older = catalog.lookup("20180505").unwrap();
        assert!(older.aliases().is_empty());
        assert_eq!(older.checksum(), "older");

        let latest = catalog.lookup("lts").unwrap();
        assert_eq!(latest.version_id(), "20180509");
        assert_eq!(latest.aliases(), ["18.04", "b", "bionic", "lts"]);
        assert_eq!(latest.os(), "ubuntu");
        assert_eq!(latest.release_title(), "18.04 LTS");
        assert!(latest.supported());
        assert!(latest.complete());
        assert_eq!(latest.size_bytes(), 200);
        assert_eq!(latest.source_host(), HOST);
        assert!(latest.kernel_location().ends_with("unpacked/ubuntu-18.04-server-cloudimg-amd64-vmlinuz-generic"));
    }

    #[test]
    fn combined_image_skips_unpublished_versions() {
        let catalog =
            resolve_with_policy(manifest(), HOST, "x86_64", ExtractionPolicy::CombinedImage).unwrap();

        assert_eq!(catalog.len(), 1);
        let record = catalog.lookup("bionic").unwrap();
        assert_eq!(record.checksum(), "combined");
        assert_eq!(record.image_location(), "");
        assert_eq!(record.size_bytes(), -1);
        assert!(catalog.lookup("20180505").is_none());
    }

    #[test]
    fn settings_choose_the_policy() {
        let settings = StaticSettings::new().with(DRIVER_KEY, "lxd").unwrap();
        let catalog = resolve(manifest(), HOST, "x86_64", &settings).unwrap();
        assert_eq!(catalog.len(), 1);

        let catalog = resolve(manifest(), HOST, "x86_64", &StaticSettings::new()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn unrecognized_backend_setting_propagates() {
        let err = resolve(manifest(), HOST, "x86_64", &StaticSettings::empty()).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Settings(SettingsError::Unrecognized(ref key)) if key == DRIVER_KEY
        ));
    }

    #[test]
    fn architecture_filters_products() {
        let catalog =
            resolve_with_policy(manifest(), HOST, "aarch64", ExtractionPolicy::GenericDisk).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("bionic").unwrap().checksum(), "arm");
    }

    #[test]
    fn unmapped_architecture_is_fatal() {
        let err = resolve_with_policy(manifest(), HOST, "riscv64", ExtractionPolicy::GenericDisk)
            .unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedArchitecture(ref arch) if arch == "riscv64"));
    }

    #[test]
    fn no_matching_products_is_an_empty_manifest() {
        let err = resolve_with_policy(manifest(), HOST, "s390x", ExtractionPolicy::GenericDisk)
            .unwrap_err();
        assert!(matches!(err, ManifestError::EmptyManifest(_)));
        assert_eq!(err.to_string(), "No supported products found.");
    }

    #[test]
    fn missing_products_is_an_empty_manifest() {
        let err = resolve_with_policy(br#"{"products": {}}"#, HOST, "x86_64", ExtractionPolicy::GenericDisk)
            .unwrap_err();
        assert_eq!(err.to_string(), "No products found");

        let err = resolve_with_policy(br#"{}"#, HOST, "x86_64", ExtractionPolicy::GenericDisk).unwrap_err();
        assert!(matches!(err, ManifestError::EmptyManifest(_)));
    }
}
