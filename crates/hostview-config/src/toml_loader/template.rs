//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Hostview Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[renderer]
# executable_name = "DirectX12Test.exe"
# candidates = []                   # explicit paths, tried first
# window_class = "DirectX12WindowClass"
# window_title = "DirectX 12 - RTX 3060 12GB"
# discovery_interval_ms = 100       # 10-1000
# discovery_max_attempts = 50       # interval * attempts <= 5000 ms
# shutdown_grace_ms = 1000          # 0-10000
# retry_discovery = true

[resolution]
# min_width = 800
# min_height = 600
# max_width = 1920
# max_height = 1080

[viewport]
# min_width = 320
# min_height = 240
# max_width = 7680
# max_height = 4320
# default_width = 800
# default_height = 600

[resize]
# layout_debounce_ms = 40           # 0-1000
# window_state_debounce_ms = 20
# dpi_debounce_ms = 60

[layout]
# title = "Hostview"
# width = 1280
# height = 800
# side_panel_width = 320
# group_header_height = 24
# status_row_height = 28
# panel_padding = 8

[logging]
# level = "info"                    # trace, debug, info, warn, error
"##
    .to_string()
}
