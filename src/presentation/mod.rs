// ABOUTME: Single-threaded presentation loop over the session controller.
// ABOUTME: Waits on relay events and user input, whichever comes first.

mod command;
mod view;

pub use command::{FormField, Parsed, ShellCommand, parse_line};
pub use view::SessionView;

use crate::error::Result;
use crate::output::Output;
use crate::session::{PullInputs, SessionController, SessionState};
use crate::types::Architecture;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

enum Step {
    Event,
    Input(std::io::Result<Option<String>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Renders a session and feeds it user commands. Never calls the engine
/// itself; pulls run on the controller's worker.
pub struct PresentationLoop {
    controller: SessionController,
    output: Output,
    view: SessionView,
}

impl PresentationLoop {
    pub fn new(controller: SessionController, output: Output) -> Self {
        Self {
            controller,
            output,
            view: SessionView::default(),
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Run the interactive shell until `quit` or end of input.
    ///
    /// A running pull is always drained to its terminal state before returning.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut reading = true;

        self.output.message("pullwatch shell. Type `help` for commands.");

        loop {
            let running = self.controller.is_running();
            let step = tokio::select! {
                biased;
                _ = self.controller.step(), if running => Step::Event,
                line = lines.next_line(), if reading => Step::Input(line),
                else => break,
            };

            match step {
                Step::Event => self.render(),
                Step::Input(Ok(Some(line))) => {
                    if self.handle_line(&line) == Flow::Quit {
                        reading = false;
                        if self.controller.is_running() {
                            self.output.message("waiting for the running pull to finish...");
                        }
                    }
                }
                Step::Input(Ok(None)) => reading = false,
                Step::Input(Err(e)) => return Err(e.into()),
            }
        }

        Ok(())
    }

    /// Run exactly one session for `inputs` and wait for its terminal state.
    pub async fn run_once(&mut self, inputs: PullInputs) -> Result<SessionState> {
        self.output.start_timer();
        self.controller.start(inputs)?;
        self.render();

        while self.controller.is_running() {
            if self.controller.step().await.is_none() {
                break;
            }
            self.render();
        }

        Ok(self.controller.state())
    }

    fn render(&mut self) {
        let session = self.controller.session();
        let Some(state) = self.view.render(session, &self.output) else {
            return;
        };

        let image = session
            .request()
            .map(|request| request.image().to_string())
            .unwrap_or_default();
        match state {
            SessionState::Succeeded => self.output.success(&format!("Pulled {image}")),
            SessionState::Failed => self.output.error(&format!("pull of {image} failed")),
            SessionState::Idle | SessionState::Running => {}
        }
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match parse_line(line) {
            Parsed::Empty => Flow::Continue,
            Parsed::Help(text) => {
                self.output.message(text.trim_end());
                Flow::Continue
            }
            Parsed::Invalid(text) => {
                self.output.error(text.trim_end());
                Flow::Continue
            }
            Parsed::Command(command) => self.handle_command(command),
        }
    }

    fn handle_command(&mut self, command: ShellCommand) -> Flow {
        match command {
            ShellCommand::Pull {
                image,
                registry,
                arch,
            } => {
                let mut inputs = self.controller.form().clone();
                if let Some(image) = image {
                    inputs.image = image;
                }
                if let Some(registry) = registry {
                    inputs.registry = registry;
                }
                if let Some(arch) = arch {
                    inputs.architecture = arch;
                }

                match self.controller.start(inputs) {
                    Ok(()) => {
                        self.output.start_timer();
                        self.render();
                    }
                    Err(e) => self.output.error(&e.to_string()),
                }
            }
            ShellCommand::Set { field, value } => self.set_field(field, value),
            ShellCommand::Reset => match self.controller.reset() {
                Ok(()) => {
                    self.render();
                    self.output.message("reset to defaults");
                }
                Err(e) => self.output.error(&e.to_string()),
            },
            ShellCommand::Status => self.status(),
            ShellCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn set_field(&mut self, field: FormField, value: Option<String>) {
        let form = self.controller.form_mut();
        match (field, value) {
            (FormField::Image, value) => form.image = value.unwrap_or_default(),
            (FormField::Registry, Some(value)) => form.registry = value,
            (FormField::Arch, Some(value)) => match value.parse::<Architecture>() {
                Ok(arch) => form.architecture = arch,
                Err(e) => self.output.error(&format!("{e}")),
            },
            (field, None) => {
                let name = format!("{field:?}").to_lowercase();
                self.output.error(&format!("{name} needs a value"));
            }
        }
    }

    fn status(&self) {
        let session = self.controller.session();
        let form = self.controller.form();
        self.output.message(&format!(
            "state: {}\nlayer: {}  overall: {}\nimage: {}\nregistry: {}\narch: {}",
            session.state(),
            session.layer_progress(),
            session.overall_progress(),
            if form.image.is_empty() {
                "(unset)"
            } else {
                form.image.as_str()
            },
            form.registry,
            form.architecture
        ));
    }
}
