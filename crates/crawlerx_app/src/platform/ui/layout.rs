use chrono::{Datelike, Local};
use crawlerx_core::{Msg, Route};
use eframe::egui::{self, Align, Layout, RichText, Sense};

use super::constants::APP_TITLE;

pub fn header(ctx: &egui::Context, dark_mode: bool, msgs: &mut Vec<Msg>) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let title = egui::Label::new(RichText::new(APP_TITLE).heading().strong())
                .sense(Sense::click());
            if ui.add(title).on_hover_text("Job list").clicked() {
                msgs.push(Msg::Navigate(Route::Home));
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if dark_mode { "Light mode" } else { "Dark mode" };
                if ui.button(label).on_hover_text("Toggle dark mode").clicked() {
                    msgs.push(Msg::ThemeToggled);
                }
            });
        });
        ui.add_space(6.0);
    });
}

pub fn footer(ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.small(format!(
                "CrawlerX - Modern Web Crawler Dashboard © {}",
                Local::now().year()
            ));
        });
    });
}
