//! Platform detection.
//!
//! Only what the keyboard layer needs: whether the primary modifier is Cmd.

use std::sync::OnceLock;

/// Cached platform detection results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Platform {
    pub mac: bool,
    pub ios: bool,
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Get cached platform info. Detection runs once on first call.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(detect_platform)
}

impl Platform {
    /// Classify from `navigator.platform` and `navigator.userAgent`.
    pub fn from_navigator(platform_str: &str, user_agent: &str, touch: bool) -> Self {
        let platform_str = platform_str.to_lowercase();
        let user_agent = user_agent.to_lowercase();

        let ios = user_agent.contains("iphone")
            || user_agent.contains("ipad")
            || user_agent.contains("ipod")
            || (platform_str.contains("mac") && touch);
        let mac = platform_str.contains("mac") && !ios;

        Self { mac, ios }
    }

    /// Cmd is the primary modifier on Apple platforms.
    pub fn primary_is_meta(&self) -> bool {
        self.mac || self.ios
    }
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };
    let navigator = window.navigator();
    Platform::from_navigator(
        &navigator.platform().unwrap_or_default(),
        &navigator.user_agent().unwrap_or_default(),
        navigator.max_touch_points() > 0,
    )
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_platform() -> Platform {
    Platform::default()
}
