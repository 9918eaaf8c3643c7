pub const IN_PATH_VAR: &str = "IN_PATH";
pub const OUT_PATH_VAR: &str = "OUT_PATH";

pub const COMMAND_SEPARATOR: &str = " && ";

pub const DEFAULT_SETTING_PATH: &str = "setting.json";
pub const DEFAULT_OUTPUT_PATH: &str = "./output.json";

pub const REPORT_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
