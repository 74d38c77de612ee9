use std::time::Duration;

// Host-facing names and timings used by the front-end.

// Persisted settings keys
pub const SETTING_ENABLED: &str = "appreciate/enabled";
pub const SETTING_NEVER_WHISTLE: &str = "appreciate/neverWhistle";
pub const SETTING_FIRST_RUN: &str = "appreciate/firstRun";
pub const SETTING_ENTITY_COLOR: &str = "appreciate/entityColor";

// Desktop trigger key
pub const APPRECIATE_KEY: &str = "Z";

// Wearable converter
pub const WEARABLE_SERVER_SCRIPT_URL: &str =
    "https://hifi-content.s3.amazonaws.com/liv/avatar_shopping_demo/wearableServer.js";
pub const WEARABLE_RELOCK_DELAY: Duration = Duration::from_millis(2000);
