//! Draws the view model with egui and collects the messages produced by
//! user interaction. Nothing here touches `AppState` directly.

use crawlerx_core::{
    AppViewModel, DetailTab, DetailView, ExportFormat, HomeView, JobDetailView, JobRowView,
    ListBody, ListingView, LogsView, Msg, Notice, OverviewView, PageView, ResultsView, Route,
    StatusFilter, StatusTone, SubmissionView,
};
use eframe::egui::{self, Align, Color32, Layout, RichText, Sense};

use super::constants::{
    connection_color, tone_color, CONTENT_MAX_WIDTH, RAW_DATA_MAX_HEIGHT, SEARCH_PLACEHOLDER,
    URL_PLACEHOLDER,
};
use super::{format, layout};

pub fn render(ctx: &egui::Context, view: &AppViewModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    layout::header(ctx, view.dark_mode, &mut msgs);
    layout::footer(ctx);

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.set_max_width(CONTENT_MAX_WIDTH);
                match &view.page {
                    PageView::Blank => {}
                    PageView::Home(home) => home_page(ui, home, view.dark_mode, &mut msgs),
                    PageView::Detail(detail) => detail_page(ui, detail, view.dark_mode, &mut msgs),
                }
            });
    });
    msgs
}

fn home_page(ui: &mut egui::Ui, home: &HomeView, dark_mode: bool, msgs: &mut Vec<Msg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Start a New Crawl");
        ui.add_space(8.0);
        submission_form(ui, &home.submission, dark_mode, msgs);
    });
    ui.add_space(16.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        job_listing(ui, &home.listing, dark_mode, msgs);
    });
}

fn submission_form(ui: &mut egui::Ui, view: &SubmissionView, dark_mode: bool, msgs: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        let mut input = view.input.clone();
        let edit = egui::TextEdit::singleline(&mut input)
            .hint_text(URL_PLACEHOLDER)
            .desired_width(ui.available_width() - 160.0);
        let response = ui.add_enabled(view.input_enabled, edit);
        if response.changed() {
            msgs.push(Msg::UrlInputChanged(input));
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            msgs.push(Msg::UrlInputEnter);
        }

        if view.in_flight {
            ui.spinner();
        }
        let button = egui::Button::new(view.button_label);
        if ui.add_enabled(view.submit_enabled, button).clicked() {
            msgs.push(Msg::SubmitClicked);
        }
    });

    if let Some(notice) = &view.notice {
        ui.add_space(6.0);
        let (text, color) = match notice {
            Notice::Success(text) => (text, notice_color(true, dark_mode)),
            Notice::Error(text) => (text, notice_color(false, dark_mode)),
        };
        ui.colored_label(color, text);
    }
}

fn notice_color(success: bool, dark_mode: bool) -> Color32 {
    let tone = if success {
        StatusTone::Success
    } else {
        StatusTone::Failure
    };
    tone_color(tone, dark_mode)
}

fn job_listing(ui: &mut egui::Ui, view: &ListingView, dark_mode: bool, msgs: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        ui.heading("Recent Crawl Jobs");
        ui.add_space(12.0);
        ui.colored_label(
            connection_color(view.connection),
            format!("● {}", view.connection_label),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Refresh").on_hover_text("Refresh jobs").clicked() {
                msgs.push(Msg::RefreshClicked);
            }
            if view.refreshing {
                ui.spinner();
            }
        });
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let mut query = view.query.clone();
        let search = egui::TextEdit::singleline(&mut query)
            .hint_text(SEARCH_PLACEHOLDER)
            .desired_width(ui.available_width() - 320.0);
        if ui.add(search).changed() {
            msgs.push(Msg::SearchChanged(query));
        }

        egui::ComboBox::from_id_salt("status_filter")
            .selected_text(view.status_filter.label())
            .width(160.0)
            .show_ui(ui, |ui| {
                for choice in StatusFilter::choices() {
                    let selected = choice == view.status_filter;
                    if ui.selectable_label(selected, choice.label()).clicked() && !selected {
                        msgs.push(Msg::StatusFilterChanged(choice));
                    }
                }
            });

        if view.can_clear_filters && ui.button("Clear Filters").clicked() {
            msgs.push(Msg::ClearFilters);
        }
    });
    ui.weak(&view.summary);
    ui.add_space(8.0);

    match &view.body {
        ListBody::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading jobs...");
            });
        }
        ListBody::Empty => {
            empty_state(ui, "No crawl jobs yet", Some("Submit a URL above to start crawling"))
        }
        ListBody::NoMatches => {
            empty_state(ui, "No matching jobs found", Some("Try adjusting your search filters"))
        }
        ListBody::Rows(rows) => job_table(ui, rows, dark_mode, msgs),
    }
}

fn job_table(ui: &mut egui::Ui, rows: &[JobRowView], dark_mode: bool, msgs: &mut Vec<Msg>) {
    egui::Grid::new("job_table")
        .num_columns(4)
        .striped(true)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            ui.strong("ID");
            ui.strong("URL");
            ui.strong("Status");
            ui.strong("Actions");
            ui.end_row();

            for row in rows {
                let id = ui
                    .link(RichText::new(&row.short_id).monospace())
                    .on_hover_text("View details");
                if id.clicked() {
                    msgs.push(Msg::Navigate(Route::Job(row.id.clone())));
                }
                let url = egui::Label::new(&row.url).truncate().sense(Sense::click());
                if ui.add(url).on_hover_text("Open in browser").clicked() {
                    msgs.push(Msg::OpenUrl(row.url.clone()));
                }
                ui.colored_label(
                    tone_color(row.tone, dark_mode),
                    format!("● {}", row.status.as_str()),
                );
                ui.horizontal(|ui| export_buttons(ui, &row.id, "JSON", "CSV", msgs));
                ui.end_row();
            }
        });
}

fn export_buttons(ui: &mut egui::Ui, job_id: &str, json: &str, csv: &str, msgs: &mut Vec<Msg>) {
    for (label, format) in [(json, ExportFormat::Json), (csv, ExportFormat::Csv)] {
        if ui.button(label).clicked() {
            msgs.push(Msg::ExportRequested {
                job_id: job_id.to_string(),
                format,
            });
        }
    }
}

fn empty_state(ui: &mut egui::Ui, title: &str, hint: Option<&str>) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(RichText::new(title).size(17.0).strong());
        if let Some(hint) = hint {
            ui.weak(hint);
        }
        ui.add_space(24.0);
    });
}

fn detail_page(ui: &mut egui::Ui, view: &DetailView, dark_mode: bool, msgs: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        if ui.button("Back").clicked() {
            msgs.push(Msg::NavigateBack);
        }
        ui.heading("Job Details");
        if let DetailView::Loaded(job) = view {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.colored_label(tone_color(job.status.tone(), dark_mode), job.status.as_str());
            });
        }
    });
    ui.separator();

    match view {
        DetailView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading job details...");
            });
        }
        DetailView::Failed { message } => {
            ui.colored_label(notice_color(false, dark_mode), message);
            ui.add_space(12.0);
            return_button(ui, msgs);
        }
        DetailView::NotFound => {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label("Job not found");
                ui.add_space(12.0);
                return_button(ui, msgs);
            });
        }
        DetailView::Loaded(job) => job_detail(ui, job, dark_mode, msgs),
    }
}

fn return_button(ui: &mut egui::Ui, msgs: &mut Vec<Msg>) {
    if ui.button("Return to Job List").clicked() {
        msgs.push(Msg::NavigateBack);
    }
}

fn job_detail(ui: &mut egui::Ui, job: &JobDetailView, dark_mode: bool, msgs: &mut Vec<Msg>) {
    egui::Grid::new("job_summary")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            ui.weak("Job ID");
            ui.monospace(&job.id);
            ui.end_row();
            ui.weak("Created At");
            ui.label(format::timestamp(job.created_at.as_deref()));
            ui.end_row();
            ui.weak("URL");
            if ui.link(&job.url).clicked() {
                msgs.push(Msg::OpenUrl(job.url.clone()));
            }
            ui.end_row();
        });
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        for tab in DetailTab::ALL {
            let selected = job.tab == tab;
            if ui.selectable_label(selected, tab.label()).clicked() && !selected {
                msgs.push(Msg::TabSelected(tab));
            }
        }
    });
    ui.separator();

    match job.tab {
        DetailTab::Overview => overview_tab(ui, &job.id, &job.overview, msgs),
        DetailTab::Results => results_tab(ui, &job.results, dark_mode, msgs),
        DetailTab::Logs => logs_tab(ui, &job.logs, dark_mode),
    }
}

fn overview_tab(ui: &mut egui::Ui, job_id: &str, view: &OverviewView, msgs: &mut Vec<Msg>) {
    ui.label(RichText::new("Crawl Summary").size(17.0).strong());
    ui.add_space(6.0);
    ui.columns(3, |columns| {
        stat_card(&mut columns[0], "Title", &view.title);
        stat_card(&mut columns[1], "Links Found", &view.link_count.to_string());
        stat_card(&mut columns[2], "Status", &view.status_label);
    });
    ui.add_space(8.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.weak("Description");
        ui.label(&view.description);
    });
    ui.add_space(12.0);
    ui.horizontal(|ui| export_buttons(ui, job_id, "Export as JSON", "Export as CSV", msgs));
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.weak(title);
        ui.label(RichText::new(value).size(18.0).strong());
    });
}

fn results_tab(ui: &mut egui::Ui, view: &ResultsView, dark_mode: bool, msgs: &mut Vec<Msg>) {
    ui.label(RichText::new("Links Found").size(17.0).strong());
    ui.add_space(6.0);
    match view {
        ResultsView::Links(rows) => {
            egui::Grid::new("link_table")
                .num_columns(2)
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Link URL");
                    ui.strong("Type");
                    ui.end_row();
                    for row in rows {
                        if ui.link(&row.display).on_hover_text(&row.target).clicked() {
                            msgs.push(Msg::OpenUrl(row.target.clone()));
                        }
                        let color = if dark_mode {
                            Color32::from_gray(200)
                        } else {
                            Color32::from_gray(70)
                        };
                        ui.colored_label(color, row.kind.label());
                        ui.end_row();
                    }
                });
        }
        ResultsView::Empty { still_running } => {
            let hint = still_running.then_some("The job is still in progress");
            empty_state(ui, "No results available", hint);
        }
    }
}

fn logs_tab(ui: &mut egui::Ui, view: &LogsView, dark_mode: bool) {
    ui.label(RichText::new("Crawl Details").size(17.0).strong());
    ui.add_space(6.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("crawl_details")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                ui.weak("Created At");
                ui.label(format::timestamp(view.created_at.as_deref()));
                ui.end_row();
                ui.weak("Updated At");
                ui.label(format::timestamp(view.updated_at.as_deref()));
                ui.end_row();
            });
        if let Some(error) = &view.error {
            ui.add_space(8.0);
            ui.weak("Errors");
            ui.colored_label(notice_color(false, dark_mode), error);
        }
    });

    ui.add_space(12.0);
    ui.label(RichText::new("Raw Data").size(17.0).strong());
    ui.add_space(6.0);
    egui::ScrollArea::vertical()
        .id_salt("raw_data")
        .max_height(RAW_DATA_MAX_HEIGHT)
        .show(ui, |ui| {
            let mut raw = view.raw_record.as_str();
            ui.add(
                egui::TextEdit::multiline(&mut raw)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });
}
