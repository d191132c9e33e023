//! Tool configuration.
//!
//! Consolidates configuration from several tiers with field-by-field YAML merging:
//! 1. **Defaults** - built in
//! 2. **Project** - `$CWD/.settings-compare/config.yaml`
//! 3. **User** - `~/.settings-compare/config.yaml`
//! 4. **Explicit** - `--config <FILE>` or `SETTINGS_COMPARE_CONFIG_PATH`
//! 5. **Environment** - individual overrides
//!
//! Command-line flags are applied on top by the binary.
//!
//! ## Environment Variables
//! - `SETTINGS_COMPARE_CONFIG_PATH` - Explicit config file
//! - `SETTINGS_COMPARE_PROJECT_DIR` - Project config dir (default: `./.settings-compare`)
//! - `SETTINGS_COMPARE_USER_DIR` - User config dir (default: `~/.settings-compare`)
//! - `SETTINGS_COMPARE_NULL_POLICY` - `keep` or `omit`
//! - `SETTINGS_COMPARE_KEY_POLICY` - `expand` or `reject`

mod loader;
mod merge;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, ConfigPaths, ConfigTier};
pub use merge::{merge_all, merge_layers};
pub use types::*;
