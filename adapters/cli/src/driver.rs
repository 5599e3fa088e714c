use artifact_maze_rendering::{Frame, InputRouter, Presenter, RenderingConfig};
use artifact_maze_system_game_flow::{FixedStep, Flow, GameFlow, Phase};

/// Per-frame glue between the backend ports and the state machine.
#[derive(Debug)]
pub(crate) struct FrameDriver {
    flow: GameFlow,
    presenter: Presenter,
    router: InputRouter,
    clock: FixedStep,
}

impl FrameDriver {
    pub(crate) fn new(flow: GameFlow, config: RenderingConfig) -> Self {
        let presenter = Presenter::new(config);
        let router = InputRouter::new(*presenter.layout());
        Self {
            flow,
            presenter,
            router,
            clock: FixedStep::default(),
        }
    }

    /// Routes input, runs the ticks due for `frame.dt`, plays queued cues,
    /// and draws the resulting state.
    pub(crate) fn frame(&mut self, frame: Frame<'_>) -> Flow {
        let Frame {
            dt,
            input,
            presentation,
            audio,
        } = frame;

        for event in input.poll() {
            if let Some(intent) = self.router.route(self.flow.phase(), event) {
                let _ = self.flow.handle(intent);
            }
        }

        let mut flow = if matches!(self.flow.phase(), Phase::Exited) {
            Flow::Exit
        } else {
            Flow::Continue
        };
        for _ in 0..self.clock.advance(dt) {
            if flow == Flow::Exit {
                break;
            }
            flow = self.flow.tick();
        }

        for cue in self.flow.drain_cues() {
            audio.play(cue);
        }

        if flow == Flow::Continue {
            self.presenter.draw(&self.flow, self.router.pointer(), presentation);
        }
        flow
    }

    #[cfg(test)]
    fn flow(&self) -> &GameFlow {
        &self.flow
    }
}
