//! Build-time git metadata, captured by build.rs.

pub fn git_hash() -> &'static str {
    env!("GIT_HASH")
}

pub fn git_dirty() -> &'static str {
    env!("GIT_DIRTY")
}

/// Version string reported to Home Assistant, e.g. `abc123` or
/// `abc123-dirty`.
pub fn sw_version() -> String {
    if git_dirty() == "dirty" {
        format!("{}-dirty", git_hash())
    } else {
        git_hash().to_string()
    }
}
