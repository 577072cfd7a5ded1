use std::sync::mpsc;

use crawlerx_core::{update, AppState, AppViewModel, Msg};
use crawlerx_engine::EngineHandle;
use eframe::egui;

use super::effects::EffectRunner;
use super::ui;

/// Owns the state machine on the UI thread. Engine events and bus notices
/// arrive through `msg_rx`; widget interaction comes back from rendering.
pub struct DashboardApp {
    state: AppState,
    view: AppViewModel,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
    applied_dark_mode: Option<bool>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, engine: EngineHandle) -> Self {
        let ctx = cc.egui_ctx.clone();
        let dark_mode = ctx.style().visuals.dark_mode;
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(engine, msg_tx.clone(), ctx);

        let state = AppState::new().with_dark_mode(dark_mode);
        let view = state.view();
        let _ = msg_tx.send(Msg::Started);

        Self {
            state,
            view,
            msg_rx,
            effects,
            applied_dark_mode: None,
        }
    }

    fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.effects.run(effects);
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.applied_dark_mode == Some(self.view.dark_mode) {
            return;
        }
        let visuals = if self.view.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);
        self.applied_dark_mode = Some(self.view.dark_mode);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();
        self.apply_theme(ctx);

        let interactions = ui::render::render(ctx, &self.view);
        if !interactions.is_empty() {
            for msg in interactions {
                self.dispatch_msg(msg);
            }
            ctx.request_repaint();
        }
    }
}
