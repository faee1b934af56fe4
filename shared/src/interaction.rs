//! Per-prop interaction state machine.
//!
//! A prop is always in exactly one of four states:
//!
//! - `None`: freshly spawned, kinematic, waiting for its first click.
//! - `Idle`: simulated body that hops around on its own.
//! - `Dragging`: kinematic body that follows the pointer.
//! - `Focused`: kinematic and stationary; the camera looks at it and its dialogue is shown.
//!
//! Transitions
//! - `None --click--> Idle`
//! - `Idle --click--> Focused` (camera target <- prop pose, text <- current dialogue line)
//! - `Focused --click--> Idle` (camera target <- default anchor, text <- "")
//! - `any --held past threshold while moving--> Dragging`
//! - `Dragging --released--> Idle`
//!
//! Entry actions only run on an actual change of state. Calling into the same state twice is a
//! no-op, which keeps the shared camera target and text sink single-writer.
//!
//! Focus is tracked per prop, not per scene. If prop A is focused and then prop B is focused,
//! unfocusing A still restores the default anchor and clears the text even though B stays
//! `Focused`. Callers that want exclusive focus must unfocus the previous prop themselves.

use std::sync::Arc;

use log::debug;
use nalgebra::{Vector2, Vector3};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    body::{PhysicsBody, PointerProjector},
    camera::{CameraTarget, Pose},
    dialogue::{DialogueProgress, TextSink},
    gesture::{Gesture, PointerSample, classify, is_held},
    movement::MovementDriver,
    settings::{Behavior, ConfigError, PropConfig},
    tween::RotationTween,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropState {
    #[default]
    None,
    Idle,
    Dragging,
    Focused,
}

impl PropState {
    /// Does this state hand the body over to the physics simulation?
    #[inline]
    pub fn is_simulated(self) -> bool {
        matches!(self, PropState::Idle)
    }
}

/// A change of state reported back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: PropState,
    pub to: PropState,
}

/// Scene-owned collaborators a prop talks to, resolved once at construction.
#[derive(Clone)]
pub struct SceneLinks {
    pub camera_target: CameraTarget,
    /// Where the camera goes back to when nothing is focused.
    pub default_anchor: Pose,
    /// Dialogue display. Props keep working without one.
    pub talk_text: Option<Arc<dyn TextSink>>,
}

impl SceneLinks {
    pub fn new(camera_target: CameraTarget, default_anchor: Pose) -> Self {
        Self {
            camera_target,
            default_anchor,
            talk_text: None,
        }
    }

    pub fn with_talk_text(mut self, sink: Arc<dyn TextSink>) -> Self {
        self.talk_text = Some(sink);
        self
    }

    fn display(&self, text: &str) {
        if let Some(sink) = &self.talk_text {
            sink.display(text);
        }
    }
}

/// Press in progress.
#[derive(Clone, Copy, Debug)]
struct Press {
    down_time: f32,
}

/// One interactive prop.
pub struct InteractiveObject<R: rand::Rng = StdRng> {
    state: PropState,
    behavior: Behavior,
    click_threshold_secs: f32,
    advance_per_focus: usize,
    movement: MovementDriver<R>,
    look: Option<RotationTween>,
    press: Option<Press>,
    /// Last known pointer position in screen space.
    pointer: Option<Vector2<f32>>,
    /// `prop position - pointer world position` captured at pointer-down.
    drag_offset: Vector3<f32>,
    hovered: bool,
    dialogue: DialogueProgress,
    links: SceneLinks,
}

impl InteractiveObject<StdRng> {
    /// Build a prop with an entropy-seeded RNG.
    pub fn new(config: PropConfig, links: SceneLinks, now: f32) -> Result<Self, ConfigError> {
        Self::with_rng(config, links, StdRng::from_os_rng(), now)
    }
}

impl<R: rand::Rng> InteractiveObject<R> {
    /// Build a prop with an explicit RNG.
    ///
    /// Interactive props start in `None` and hop on their first `Idle` tick. Ambient props start
    /// wandering immediately, with their first hop one random interval after `now`.
    pub fn with_rng(
        config: PropConfig,
        links: SceneLinks,
        rng: R,
        now: f32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let PropConfig {
            behavior,
            movement,
            script,
            advance_per_focus,
            click_threshold_secs,
        } = config;

        let (state, movement) = match behavior {
            Behavior::Interactive => (PropState::None, MovementDriver::new(movement, rng)),
            Behavior::Ambient => (
                PropState::Idle,
                MovementDriver::with_initial_delay(movement, rng, now),
            ),
        };

        Ok(Self {
            state,
            behavior,
            click_threshold_secs,
            advance_per_focus,
            movement,
            look: None,
            press: None,
            pointer: None,
            drag_offset: Vector3::zeros(),
            hovered: false,
            dialogue: DialogueProgress::new(script),
            links,
        })
    }

    #[inline]
    pub fn state(&self) -> PropState {
        self.state
    }

    #[inline]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    #[inline]
    pub fn dialogue(&self) -> &DialogueProgress {
        &self.dialogue
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    #[inline]
    pub fn drag_offset(&self) -> Vector3<f32> {
        self.drag_offset
    }

    #[inline]
    pub fn next_hop_time(&self) -> f32 {
        self.movement.next_jump_time()
    }

    /// Put a freshly created body into the state this prop starts in.
    pub fn prepare_body(&self, body: &mut impl PhysicsBody) {
        body.set_kinematic(!self.state.is_simulated());
    }

    pub fn on_hover(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Pointer went down on this prop.
    pub fn pointer_down(
        &mut self,
        sample: PointerSample,
        body: &impl PhysicsBody,
        projector: &impl PointerProjector,
    ) {
        if self.behavior == Behavior::Ambient {
            return;
        }

        // An unprojectable press drags with no offset until the pointer projects again.
        let position = body.pose().translation;
        self.drag_offset = projector
            .project(sample.screen, position)
            .map(|pointer_world| position - pointer_world)
            .unwrap_or_else(Vector3::zeros);

        self.pointer = Some(sample.screen);
        self.press = Some(Press {
            down_time: sample.time,
        });
    }

    /// Pointer moved (or is simply still held) after going down on this prop.
    pub fn pointer_drag(
        &mut self,
        sample: PointerSample,
        body: &mut impl PhysicsBody,
    ) -> Option<Transition> {
        let press = self.press?;
        self.pointer = Some(sample.screen);

        if is_held(press.down_time, sample.time, self.click_threshold_secs) {
            self.switch_state(PropState::Dragging, body)
        } else {
            None
        }
    }

    /// Pointer released after going down on this prop.
    pub fn pointer_up(
        &mut self,
        sample: PointerSample,
        body: &mut impl PhysicsBody,
    ) -> Option<Transition> {
        let press = self.press.take()?;
        self.pointer = Some(sample.screen);

        match classify(press.down_time, sample.time, self.click_threshold_secs) {
            Gesture::Click => match self.state {
                PropState::Idle => self.switch_state(PropState::Focused, body),
                PropState::None | PropState::Focused => self.switch_state(PropState::Idle, body),
                PropState::Dragging => None,
            },
            Gesture::Drag => match self.state {
                PropState::Dragging => self.switch_state(PropState::Idle, body),
                _ => None,
            },
        }
    }

    /// Fixed-rate update. Drives the body according to the current state.
    pub fn fixed_tick(
        &mut self,
        now: f32,
        body: &mut impl PhysicsBody,
        projector: &impl PointerProjector,
    ) {
        match self.state {
            PropState::Idle => self.wander(now, body),
            PropState::Dragging => self.follow_pointer(body, projector),
            PropState::None | PropState::Focused => {}
        }
    }

    /// Enter `next`, running its entry actions. Same-state calls are ignored.
    pub fn switch_state(
        &mut self,
        next: PropState,
        body: &mut impl PhysicsBody,
    ) -> Option<Transition> {
        let from = self.state;
        if from == next {
            return None;
        }
        self.state = next;

        // Any in-flight look rotation belongs to the wander behavior.
        if next != PropState::Idle {
            self.look = None;
        }

        match next {
            PropState::Idle => {
                body.set_kinematic(false);
                if from == PropState::Focused {
                    self.links
                        .camera_target
                        .set_target(self.links.default_anchor);
                    self.links.display("");
                }
            }
            PropState::Dragging => {
                body.set_kinematic(true);
            }
            PropState::Focused => {
                body.set_kinematic(true);
                self.links.camera_target.set_target(body.pose());
                self.links.display(self.dialogue.current_line());
                self.dialogue.advance(self.advance_per_focus);
            }
            PropState::None => {
                body.set_kinematic(true);
            }
        }

        debug!("prop state {from:?} -> {next:?}");
        Some(Transition { from, to: next })
    }

    fn wander(&mut self, now: f32, body: &mut impl PhysicsBody) {
        let current = body.pose().rotation;

        if let Some(hop) = self.movement.tick(now, current) {
            self.look = Some(RotationTween::look(
                current,
                hop.target_rotation(current),
                now,
            ));
            body.apply_impulse(hop.impulse);
        }

        if let Some(look) = self.look {
            body.set_rotation(look.sample(now));
            if look.is_finished(now) {
                self.look = None;
            }
        }
    }

    fn follow_pointer(&mut self, body: &mut impl PhysicsBody, projector: &impl PointerProjector) {
        let Some(screen) = self.pointer else {
            return;
        };
        let Some(pointer_world) = projector.project(screen, body.pose().translation) else {
            return;
        };
        body.move_to(pointer_world + self.drag_offset);
    }
}
