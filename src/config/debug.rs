//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every use site is additionally gated by
//! `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit provider selection, request URLs and row counts.
    pub print_fetch: bool,
    /// Emit cache validation, read and write details.
    pub print_cache: bool,
    /// Emit split sizes, fitted scale parameters and window counts.
    pub print_forecast: bool,
    /// Emit model artifact loading details.
    pub print_model: bool,
    /// Emit UI interaction logs (navigation, button presses).
    pub print_ui_interactions: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch: true,
    print_cache: false,
    print_forecast: false,
    print_model: true,
    print_ui_interactions: false,
    print_shutdown: false,
};
