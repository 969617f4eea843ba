//! Display version of the running build

/// `major.minor`, followed by `.build` and `.revision` only when non-zero
///
/// A zero build suppresses only itself: `1.2.0.4` renders as `1.2.4`.
pub fn format_version(major: u32, minor: u32, build: u32, revision: u32) -> String {
    let mut version = format!("{}.{}", major, minor);
    if build > 0 {
        version.push_str(&format!(".{}", build));
    }
    if revision > 0 {
        version.push_str(&format!(".{}", revision));
    }
    version
}

/// Version of this crate; the Cargo patch number is the build component
pub fn crate_version() -> String {
    format_version(
        parse_component(env!("CARGO_PKG_VERSION_MAJOR")),
        parse_component(env!("CARGO_PKG_VERSION_MINOR")),
        parse_component(env!("CARGO_PKG_VERSION_PATCH")),
        0,
    )
}

fn parse_component(component: &str) -> u32 {
    component.parse().unwrap_or(0)
}
