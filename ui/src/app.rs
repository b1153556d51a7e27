use activity_business::FetchUsersCommand;

use crate::{state::State, widgets};

pub const TITLE: &str = "User Activity Dashboard";

pub struct DashboardApp {
    state: State,
}

impl DashboardApp {
    /// Called once before the first frame. Starts the one-shot user fetch.
    pub fn new(mut state: State) -> Self {
        state.ctx.enqueue_command::<FetchUsersCommand>();
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for DashboardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply finished commands and settle derived computes before rendering.
        self.state.ctx.run_all_dirty();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            ui.separator();
            widgets::users_table(&mut self.state.ctx, ui);
        });

        // Run background jobs
        self.state.ctx.flush_commands();
        self.state.ctx.run_all_dirty();

        // Keep polling while a command can still publish.
        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.ctx.cancel_all();
    }
}
