use serde::Serialize;
use url::Url;

/// One selectable artifact resolved from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub(crate) aliases: Vec<String>,
    pub(crate) os: String,
    pub(crate) release: String,
    pub(crate) release_title: String,
    pub(crate) supported: bool,
    pub(crate) image_location: String,
    pub(crate) kernel_location: String,
    pub(crate) initrd_location: String,
    pub(crate) checksum: String,
    pub(crate) source_host: String,
    pub(crate) version_id: String,
    pub(crate) size_bytes: i64,
    pub(crate) complete: bool,
}

impl ImageRecord {
    /// Names this record answers to besides its version id. Only the latest
    /// version of a product carries any.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// OS
    /// eg. Ubuntu
    pub fn os(&self) -> &str {
        &self.os
    }

    /// eg. bionic
    pub fn release(&self) -> &str {
        &self.release
    }

    /// eg. 18.04 LTS
    pub fn release_title(&self) -> &str {
        &self.release_title
    }

    pub fn supported(&self) -> bool {
        self.supported
    }

    /// Disk image path relative to [`Self::source_host`]. Empty for
    /// combined images.
    pub fn image_location(&self) -> &str {
        &self.image_location
    }

    pub fn kernel_location(&self) -> &str {
        &self.kernel_location
    }

    pub fn initrd_location(&self) -> &str {
        &self.initrd_location
    }

    /// Hex SHA256 of the primary artifact. May be empty for disk images.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn source_host(&self) -> &str {
        &self.source_host
    }

    /// Version of image
    /// eg. 20180509
    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    /// Declared size, `-1` when unknown.
    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn image_url(&self) -> Option<String> {
        self.absolute(&self.image_location)
    }

    pub fn kernel_url(&self) -> Option<String> {
        self.absolute(&self.kernel_location)
    }

    pub fn initrd_url(&self) -> Option<String> {
        self.absolute(&self.initrd_location)
    }

    fn absolute(&self, relative_path: &str) -> Option<String> {
        if relative_path.is_empty() {
            return None;
        }

        // Try to build an absolute URL, fallback to string concatenation
        let url = Url::parse(&self.source_host)
            .and_then(|base| base.join(relative_path))
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", self.source_host, relative_path));

        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::ImageRecord;

    fn record(source_host: &str, image_location: &str) -> ImageRecord {
        ImageRecord {
            aliases: Vec::new(),
            os: "Ubuntu".to_string(),
            release: "bionic".to_string(),
            release_title: "18.04 LTS".to_string(),
            supported: true,
            image_location: image_location.to_string(),
            kernel_location: String::new(),
            initrd_location: String::new(),
            checksum: String::new(),
            source_host: source_host.to_string(),
            version_id: "20180509".to_string(),
            size_bytes: -1,
            complete: true,
        }
    }

    #[test]
    fn joins_location_onto_host() {
        let image = record(
            "https://cloud-images.ubuntu.com/releases/",
            "server/releases/bionic/release-20180509/ubuntu-18.04-server-cloudimg-amd64.img",
        );
        assert_eq!(
            image.image_url().as_deref(),
            Some(
                "https://cloud-images.ubuntu.com/releases/server/releases/bionic/release-20180509/ubuntu-18.04-server-cloudimg-amd64.img"
            )
        );
    }

    #[test]
    fn invalid_host_falls_back_to_concatenation() {
        let image = record("mirror/", "foo.img");
        assert_eq!(image.image_url().as_deref(), Some("mirror/foo.img"));
    }

    #[test]
    fn empty_locations_have_no_url() {
        let image = record("https://cloud-images.ubuntu.com/releases/", "");
        assert_eq!(image.image_url(), None);
        assert_eq!(image.kernel_url(), None);
        assert_eq!(image.initrd_url(), None);
    }
}
