//! morphpack renders a scroll-driven species-study narrative and animates species circles
//! between two independently laid out visualizations.
//!
//! A dataset of species studies is drawn twice: as a circle packing (one enclosing circle per
//! species group) and as a column grid (one band per study type). Each rendering populates its
//! own [`EntityRegistry`]. When navigation crosses the boundary between the two sections, the
//! [`TransitionOrchestrator`] intersects the registries by species binomial, reconciles both
//! container-local positions into viewport coordinates and moves one proxy circle per shared
//! species from its source position to its destination.
//!
//! # Runtime model
//!
//! Everything runs on a virtual clock ([`Millis`]). A [`Story`] owns the page, the rendered
//! scenes, the [`TransitionContext`], the orchestrator and the [`Navigator`], and is driven by:
//!
//! - [`Story::handle_input`] / [`Story::request_navigate`] for user input,
//! - [`Story::run_timers_until`] for delayed bookkeeping (debounce, settle, timeout),
//! - [`Story::animation_frame`] for proxy motion,
//! - [`Story::advance_to`], which interleaves the two.
//!
//! At most one transition runs at a time. Every session ends, either when all proxies land or
//! when its deadline passes, and every shared species ends visible in exactly one place.
#![forbid(unsafe_code)]

mod animation;
mod data;
mod foundation;
mod geometry;
mod identity;
mod layout;
mod navigation;
mod page;
mod runtime;
mod scene;
mod story;
mod transition;

pub use animation::ease::Ease;
pub use animation::tween::{Lerp, Tween};
pub use data::dataset::{Dataset, SpeciesGroup, SpeciesItem, StudyRecord, TypeBand};
pub use data::palette::{Mechanism, Palette};
pub use foundation::core::{Color, Direction, Millis, Point, Rect, Size, Vec2, VizId};
pub use foundation::error::{MorphError, MorphResult};
pub use geometry::reconcile::{AdjustmentTable, Reconciler, SideOffsets};
pub use identity::registry::{EntityDescriptor, EntityKey, EntityRegistry};
pub use layout::config::{GridSettings, LayoutConfig, PackSettings};
pub use layout::engine::{LayoutEngine, RenderSummary};
pub use layout::grid::{BandScale, GridBand, GridCell, GridLayout, layout_grid};
pub use layout::pack::{Circle, Lcg, PackedGroup, enclose, pack_group, pack_siblings};
pub use navigation::controller::{
    BoundaryCrossing, BoundaryKind, BoundarySpec, IgnoreReason, InputResponse, NavDecision,
    Navigator, PlainScroll,
};
pub use navigation::input::{InputEvent, Key, Step};
pub use page::page::{Page, SectionSpec};
pub use runtime::timers::{TimerId, TimerQueue};
pub use scene::scene::{Scene, Shape, ShapeId, ShapeKind, ShapeRole, Stroke, TextAlign};
pub use scene::svg::{
    Frame, FrameLayer, ProxyMark, arc_path, escape, frame_to_svg, rasterize, scene_to_svg,
    write_output,
};
pub use story::config::{StoryConfig, Timings};
pub use story::story::{Stage, Story};
pub use transition::context::TransitionContext;
pub use transition::crossfade::CrossfadeSettings;
pub use transition::orchestrator::{
    CompletionCallback, TransitionHost, TransitionOrchestrator, TransitionRejected,
    TransitionSettings, TransitionStarted, TransitionState,
};
pub use transition::session::{
    Completion, Proxy, Session, SessionId, TransitionReport, TransitionRequest,
};
