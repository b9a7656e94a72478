// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const TITLE_TRUNCATE_LENGTH: usize = 60;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const CSRF_ENV_VAR: &str = "CSRF_NAME";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

pub const DEFAULT_BASE_URL: &str = "https://rgvikramjeet.videocrypt.in";
pub const DEFAULT_LISTING_PATH: &str = "/web/Course/get_layer_two_data";
pub const DEFAULT_AUTH_PATH: &str = "/web/Auth/video";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

pub const HELP_CSRF_GUIDE: &str = r#"
1. 登录平台: 使用 Chrome / Edge / Firefox 浏览器登录课程网站。
2. 打开开发者工具:
   - 在 Windows / Linux 上: 按 F12 或 Ctrl+Shift+I
   - 在 macOS 上: 按 Cmd+Opt+I (⌘⌥I)
3. 切换到“应用” (Application) / “存储” (Storage) 标签页。
4. 在 Cookies 列表中找到名为 csrf_name 的条目，复制它的值。
5. 通过 --csrf 参数或环境变量 CSRF_NAME 提供该值。"#;

pub mod api {
    /// 列表接口的固定层级与分页参数
    pub const LAYER: u32 = 3;
    pub const PAGE: u32 = 1;
    pub const REVERT_API: &str = "1#0#0#0";

    pub const DEVICE: &str = "Win32";
    pub const BROWSER: &str = "windowchrome";

    pub mod form_fields {
        pub const LAYER_TWO_INPUT_DATA: &str = "layer_two_input_data";
        pub const CONTENT: &str = "content";
        pub const CSRF_NAME: &str = "csrf_name";
        pub const TOKEN: &str = "token";
        pub const DEVICE: &str = "device";
        pub const BROWSER: &str = "browser";
    }

    pub mod suffixes {
        pub const M3U8: &str = ".m3u8";
        pub const PDF: &str = ".pdf";
    }
}
