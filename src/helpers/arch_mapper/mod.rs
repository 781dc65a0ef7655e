/// Host architecture names and the Simplestreams vocabulary they translate to.
///
/// Both the Rust names (`std::env::consts::ARCH`) and the shorter names used by
/// other tooling (`arm64`, `i386`, `power`, `power64`) are accepted.
const ARCH_TO_MANIFEST: &[(&str, &str)] = &[
    ("x86_64", "amd64"),
    ("i386", "i386"),
    ("x86", "i386"),
    ("arm", "armhf"),
    ("arm64", "arm64"),
    ("aarch64", "arm64"),
    ("power", "powerpc"),
    ("powerpc", "powerpc"),
    ("power64", "ppc64el"),
    ("powerpc64", "ppc64el"),
    ("s390x", "s390x"),
];

/// Translate a host architecture into the manifest's `arch` value.
///
/// Returns `None` when the architecture has no manifest counterpart.
pub fn to_catalog_arch(host_arch: &str) -> Option<&'static str> {
    ARCH_TO_MANIFEST
        .iter()
        .find(|(host, _)| *host == host_arch)
        .map(|(_, manifest)| *manifest)
}

/// Architecture of the running process, in the Rust vocabulary.
pub fn host_arch() -> &'static str {
    std::env::consts::ARCH
}
