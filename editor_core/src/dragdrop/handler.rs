//! The drag gesture state machine.
//!
//! A surface feeds every platform drag event into [`DragDropHandler`]. The
//! platform gives no guarantee that events arrive in the documented order
//! (`start → enter → over* → drop/leave → end`): `leave` fires for inner
//! element boundaries, `drop` may arrive without any `over`, and `end` may
//! follow a cancelled gesture. Every transition therefore checks what it
//! actually has before acting.
//!
//! # Invariants
//!
//! 1. A marker exists on the surface exactly while a [`DragSession`] exists.
//!    The marker handle lives only inside the session, and the session is
//!    taken out of the handler before its marker is removed, so a marker is
//!    removed exactly once.
//! 2. A gesture that ends without a drop on this surface leaves the buffer
//!    and selection as they were, unless the platform reports the text was
//!    moved somewhere else.
//! 3. A drop commits at most once until the next gesture reaches the
//!    surface. Once it commits, `end` never deletes the start range, whose
//!    positions no longer describe the dragged text.

use super::commit::{commit_drop, DropOutcome, DropPlan};
use super::config::DragDropConfig;
use super::effect::{resolve_drop_effect, DropEffect, EffectAllowed};
use super::event::{DragEvent, DragEventKind, EventResponse};
use super::host::{DragHost, MarkerId, SurfaceView};
use super::image::blank_drag_image;
use crate::cursor::{Position, Range};

/// Whether this surface is the source of the gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Idle,
    /// A drag started on this surface and has not ended yet.
    Dragging,
}

/// The text this surface handed to the transport on `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSource {
    pub range: Range,
    pub backwards: bool,
}

/// A drag hovering over this surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Selection when the drag reached the surface.
    pub origin: Range,
    pub origin_backwards: bool,
    /// Document position under the pointer.
    pub cursor: Position,
    /// Marker standing in for the origin selection.
    marker: MarkerId,
}

impl DragSession {
    pub fn marker(&self) -> MarkerId {
        self.marker
    }
}

/// Drives drag-and-drop for one editor surface.
#[derive(Debug, Default)]
pub struct DragDropHandler {
    config: DragDropConfig,
    state: SurfaceState,
    source: Option<DragSource>,
    session: Option<DragSession>,
    /// The effect the surface currently intends. `None` until an `enter` or
    /// `over` resolves one; it survives a drop so `end` can tell that the
    /// drop was handled here.
    operation: Option<DropEffect>,
    /// Set once a drop commits, until the next gesture reaches the surface.
    dropped: bool,
}

impl DragDropHandler {
    pub fn new(config: DragDropConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Performs one-time platform setup on the surface.
    pub fn install<H>(&self, host: &mut H)
    where
        H: SurfaceView + ?Sized,
    {
        if self.config.attach_drag_image {
            host.attach_drag_image(blank_drag_image());
        }
    }

    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn source(&self) -> Option<&DragSource> {
        self.source.as_ref()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn operation(&self) -> Option<DropEffect> {
        self.operation
    }

    /// Routes an event to its transition.
    pub fn dispatch<H>(
        &mut self,
        kind: DragEventKind,
        host: &mut H,
        event: &mut DragEvent<'_>,
    ) -> EventResponse
    where
        H: DragHost + ?Sized,
    {
        match kind {
            DragEventKind::Start => self.on_drag_start(host, event),
            DragEventKind::End => self.on_drag_end(host, event),
            DragEventKind::Enter => self.on_drag_enter(host, event),
            DragEventKind::Over => self.on_drag_over(host, event),
            DragEventKind::Leave => self.on_drag_leave(host, event),
            DragEventKind::Drop => {
                self.on_drop(host, event);
                EventResponse::PreventDefault
            }
        }
    }

    /// A drag starts from the surface's current selection.
    pub fn on_drag_start<H>(&mut self, host: &mut H, event: &mut DragEvent<'_>) -> EventResponse
    where
        H: DragHost + ?Sized,
    {
        let range = host.selection_range();
        let backwards = host.is_backwards();
        self.start(host, event, range, backwards)
    }

    /// A drag of `range` starts on this surface.
    pub fn start<H>(
        &mut self,
        host: &mut H,
        event: &mut DragEvent<'_>,
        range: Range,
        backwards: bool,
    ) -> EventResponse
    where
        H: DragHost + ?Sized,
    {
        log::debug!("Drag start from {:?}", range);
        self.source = Some(DragSource { range, backwards });
        self.dropped = false;

        let transfer = &mut *event.transfer;
        transfer.set_effect_allowed(EffectAllowed::CopyMove);
        transfer.set_drag_image(blank_drag_image(), 0, 0);
        transfer.set_data(&self.config.payload_format, &host.text_in_range(range));

        host.set_cursor_blinking(false);
        host.add_class(&self.config.dragging_class);
        self.state = SurfaceState::Dragging;
        // The platform must go on to run the drag
        EventResponse::Continue
    }

    pub fn on_drag_enter<H>(&mut self, host: &mut H, event: &mut DragEvent<'_>) -> EventResponse
    where
        H: DragHost + ?Sized,
    {
        self.dropped = false;
        let effect = self.update_effect(event);
        log::debug!("Drag enter, effect {}", effect);
        host.add_class(&self.config.dragging_class);
        EventResponse::PreventDefault
    }

    pub fn on_drag_over<H>(&mut self, host: &mut H, event: &mut DragEvent<'_>) -> EventResponse
    where
        H: DragHost + ?Sized,
    {
        let cursor = host.screen_to_document(event.x, event.y);
        match &mut self.session {
            Some(session) => session.cursor = cursor,
            None => {
                let origin = host.selection_range();
                let origin_backwards = host.is_backwards();
                host.clear_selection();
                let style = host.selection_style();
                let marker = host.add_marker(origin, &self.config.marker_class, style);
                log::debug!("Drag session opened over {:?}", origin);
                self.dropped = false;
                self.session = Some(DragSession {
                    origin,
                    origin_backwards,
                    cursor,
                    marker,
                });
            }
        }
        host.move_cursor_to(cursor);

        let effect = self.update_effect(event);
        log::trace!("Drag over {:?}, effect {}", cursor, effect);
        EventResponse::PreventDefault
    }

    pub fn on_drag_leave<H>(&mut self, host: &mut H, event: &mut DragEvent<'_>) -> EventResponse
    where
        H: DragHost + ?Sized,
    {
        // Leave also fires when crossing boundaries between inner elements
        if event.pointer_target() != Some(host.mouse_event_target()) {
            log::trace!("Ignoring drag leave for {:?}", event.pointer_target());
            return EventResponse::Continue;
        }

        log::debug!("Drag left the surface");
        host.remove_class(&self.config.dragging_class);
        self.abandon_session(host);
        self.operation = None;
        EventResponse::Continue
    }

    /// Commits a drop onto this surface.
    pub fn on_drop<H>(&mut self, host: &mut H, event: &mut DragEvent<'_>) -> DropOutcome
    where
        H: DragHost + ?Sized,
    {
        if self.dropped {
            log::trace!("Ignoring repeated drop");
            return DropOutcome::Unchanged(host.selection_range());
        }
        if self.state != SurfaceState::Dragging {
            // Dropped from elsewhere: never a move of our own text
            self.operation = None;
        }

        let session = self.session.take();
        let target = match session {
            Some(session) => session.cursor,
            None => host.screen_to_document(event.x, event.y),
        };
        let origin = match (session, self.state) {
            (Some(session), _) => Some(session.origin),
            (None, SurfaceState::Dragging) => self.source.map(|source| source.range),
            (None, SurfaceState::Idle) => None,
        };

        let plan = DropPlan {
            effect: self.operation,
            origin,
            target,
        };
        let outcome = commit_drop(host, plan, &*event.transfer, &self.config.payload_format);
        log::debug!("Drop committed: {:?}", outcome);

        host.set_selection_range(outcome.range(), false);
        if let Some(session) = session {
            host.remove_marker(session.marker);
        }
        host.remove_class(&self.config.dragging_class);

        // The document changed under the source range; `end` must not delete it
        self.source = None;
        self.dropped = true;
        outcome
    }

    /// The gesture this surface started has concluded, here or anywhere else.
    pub fn on_drag_end<H>(&mut self, host: &mut H, event: &mut DragEvent<'_>) -> EventResponse
    where
        H: DragHost + ?Sized,
    {
        // Only trustworthy once the gesture is over
        let final_effect = DropEffect::parse(&event.transfer.drop_effect());
        log::debug!(
            "Drag end, final effect {}, local operation {:?}",
            final_effect,
            self.operation
        );

        host.set_draggable(false);
        // Cancelled while still over this surface
        self.abandon_session(host);

        let handled_here = matches!(
            self.operation,
            Some(DropEffect::Copy | DropEffect::Move | DropEffect::Link)
        );
        if let Some(source) = self.source.take() {
            if !handled_here && final_effect == DropEffect::Move {
                log::debug!("Text moved away, removing {:?}", source.range);
                host.remove_range(source.range);
                host.move_cursor_to(source.range.start);
            }
        }

        self.operation = None;
        self.dropped = false;
        host.set_cursor_blinking(true);
        host.remove_class(&self.config.dragging_class);
        self.state = SurfaceState::Idle;
        EventResponse::Continue
    }

    /// Resolves the effect for this instant and publishes it on the transport.
    fn update_effect(&mut self, event: &mut DragEvent<'_>) -> DropEffect {
        let copy_requested = self.config.copy_modifier.is_held(event.modifiers);
        let effect = resolve_drop_effect(copy_requested, event.transfer.allowed_effects());
        event.transfer.set_drop_effect(effect);
        self.operation = Some(effect);
        effect
    }

    /// Removes the session's marker and gives the origin selection back.
    fn abandon_session<H>(&mut self, host: &mut H)
    where
        H: DragHost + ?Sized,
    {
        if let Some(session) = self.session.take() {
            host.remove_marker(session.marker);
            host.set_selection_range(session.origin, session.origin_backwards);
        }
    }
}
