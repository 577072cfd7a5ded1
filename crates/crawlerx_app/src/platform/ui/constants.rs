use eframe::egui::Color32;
use crawlerx_core::{ConnectionStatus, StatusTone};

pub const APP_TITLE: &str = "CrawlerX";
pub const WINDOW_SIZE: [f32; 2] = [1100.0, 780.0];
pub const CONTENT_MAX_WIDTH: f32 = 1024.0;
pub const RAW_DATA_MAX_HEIGHT: f32 = 384.0;

pub const URL_PLACEHOLDER: &str = "Enter URL to crawl (e.g., https://example.com)";
pub const SEARCH_PLACEHOLDER: &str = "Search by URL or ID";

pub fn tone_color(tone: StatusTone, dark_mode: bool) -> Color32 {
    match (tone, dark_mode) {
        (StatusTone::Success, true) => Color32::from_rgb(134, 239, 172),
        (StatusTone::Success, false) => Color32::from_rgb(22, 101, 52),
        (StatusTone::Failure, true) => Color32::from_rgb(252, 165, 165),
        (StatusTone::Failure, false) => Color32::from_rgb(153, 27, 27),
        (StatusTone::InProgress, true) => Color32::from_rgb(253, 224, 71),
        (StatusTone::InProgress, false) => Color32::from_rgb(133, 77, 14),
    }
}

pub fn connection_color(status: ConnectionStatus) -> Color32 {
    match status {
        ConnectionStatus::Connected => Color32::from_rgb(74, 222, 128),
        ConnectionStatus::Connecting => Color32::from_rgb(250, 204, 21),
        ConnectionStatus::Disconnected | ConnectionStatus::Error => Color32::from_rgb(248, 113, 113),
    }
}
