#![forbid(unsafe_code)]

//! Responsive state transitions and callback ordering.
//!
//! The engine is a set of pure transition functions from
//! `(previous config, next config, previous state)` to
//! `(next state, layouts, ordered effects)`. [`ResponsiveGrid`] is a thin
//! stateful adapter that commits each transition and dispatches its effects
//! to a [`ResponsiveHandler`].
//!
//! # Transition rules
//!
//! 1. A change to `width`, `viewport_width`, the breakpoint override, the
//!    breakpoint table or the column map re-resolves the breakpoint. When the
//!    breakpoint or either table changed, the layout is re-derived and the
//!    effects are `BreakpointChange`, `LayoutChange`, `WidthChange` in that
//!    order. Otherwise only `WidthChange` is emitted.
//! 2. Failing that, a change to `layouts` re-derives the layout for the
//!    current breakpoint and emits only `LayoutChange`.
//! 3. Otherwise nothing happens.
//!
//! # Failure Modes
//!
//! Validation runs before any transition logic. On error no effect is
//! produced and the caller's previous state stays valid.

use serde::{Deserialize, Serialize};

use crate::breakpoint::{resolve_breakpoint, resolve_columns};
use crate::compact::CompactType;
use crate::config::ResponsiveConfig;
use crate::error::ConfigError;
use crate::generate::{LayoutsByBreakpoint, find_or_generate};
use crate::item::{GridItem, Layout};
use crate::sync::synchronize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The resolved state shown by the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub breakpoint: String,
    pub cols: u32,
    pub layout: Layout,
    pub width: u32,
}

/// A callback the host should observe, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Init(EngineState),
    BreakpointChange {
        breakpoint: String,
        cols: u32,
    },
    /// The current layout plus the full per-breakpoint map it belongs to.
    LayoutChange {
        layout: Layout,
        layouts: LayoutsByBreakpoint,
    },
    WidthChange {
        width: u32,
        margin: [u32; 2],
        cols: u32,
        container_padding: Option<[u32; 2]>,
    },
}

impl Effect {
    /// Invoke the matching handler method.
    pub fn dispatch<H: ResponsiveHandler + ?Sized>(&self, handler: &mut H) {
        match self {
            Self::Init(state) => handler.on_init(state),
            Self::BreakpointChange { breakpoint, cols } => {
                handler.on_breakpoint_change(breakpoint, *cols);
            }
            Self::LayoutChange { layout, layouts } => handler.on_layout_change(layout, layouts),
            Self::WidthChange {
                width,
                margin,
                cols,
                container_padding,
            } => handler.on_width_change(*width, *margin, *cols, *container_padding),
        }
    }
}

/// Host callbacks. Every method defaults to a no-op.
pub trait ResponsiveHandler {
    fn on_init(&mut self, _state: &EngineState) {}

    fn on_breakpoint_change(&mut self, _breakpoint: &str, _cols: u32) {}

    fn on_layout_change(&mut self, _layout: &[GridItem], _layouts: &LayoutsByBreakpoint) {}

    fn on_width_change(
        &mut self,
        _width: u32,
        _margin: [u32; 2],
        _cols: u32,
        _container_padding: Option<[u32; 2]>,
    ) {
    }
}

/// A handler that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl ResponsiveHandler for NoopHandler {}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: EngineState,
    /// The per-breakpoint layouts after this transition. A fresh value; the
    /// host persists it if it wants to.
    pub layouts: LayoutsByBreakpoint,
    /// Effects in the order they must be delivered.
    pub effects: Vec<Effect>,
}

impl Transition {
    /// Whether the transition produced no effects.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Build the initial state and the `Init` effect.
pub fn initialize(config: &ResponsiveConfig) -> Result<Transition, ConfigError> {
    config.validate()?;
    let breakpoint = target_breakpoint(config)?;
    let cols = resolve_columns(&breakpoint, &config.cols)?;

    let layout = derive_layout(config, &config.layouts, &breakpoint, &breakpoint, cols);
    let state = EngineState {
        breakpoint,
        cols,
        layout,
        width: config.width,
    };

    tracing::debug!(
        target: "grid.responsive",
        breakpoint = %state.breakpoint,
        cols,
        width = config.width,
        items = state.layout.len(),
        "responsive grid initialized"
    );

    Ok(Transition {
        layouts: config.layouts.clone(),
        effects: vec![Effect::Init(state.clone())],
        state,
    })
}

/// Reconcile a configuration change.
pub fn on_config_change(
    prev: &ResponsiveConfig,
    next: &ResponsiveConfig,
    prev_state: &EngineState,
) -> Result<Transition, ConfigError> {
    let _span = tracing::debug_span!(
        "responsive.config_change",
        breakpoint = %prev_state.breakpoint,
        width = next.width,
    )
    .entered();

    if let Err(err) = next.validate() {
        tracing::warn!(target: "grid.responsive", error = %err, "configuration rejected");
        return Err(err);
    }

    if next.width_inputs_differ(prev) {
        width_change(prev, next, prev_state)
    } else if next.layouts != prev.layouts {
        Ok(layouts_change(next, prev_state))
    } else {
        Ok(Transition {
            state: prev_state.clone(),
            layouts: next.layouts.clone(),
            effects: Vec::new(),
        })
    }
}

fn width_change(
    prev: &ResponsiveConfig,
    next: &ResponsiveConfig,
    prev_state: &EngineState,
) -> Result<Transition, ConfigError> {
    let new_breakpoint = target_breakpoint(next)?;
    let new_cols = resolve_columns(&new_breakpoint, &next.cols)?;

    let mut layouts = next.layouts.clone();
    let mut effects = Vec::with_capacity(3);
    let mut state = EngineState {
        cols: new_cols,
        width: next.width,
        ..prev_state.clone()
    };

    if new_breakpoint != prev_state.breakpoint || next.tables_differ(prev) {
        // Keep what was on screen, unless the old breakpoint no longer exists.
        let last = prev_state.breakpoint.as_str();
        if next.breakpoints.contains(last) && !layouts.contains_key(last) {
            layouts.insert(last.to_string(), prev_state.layout.clone());
        }

        let layout = derive_layout(next, &layouts, &new_breakpoint, last, new_cols);
        layouts.insert(new_breakpoint.clone(), layout.clone());

        tracing::debug!(
            target: "grid.responsive",
            from = last,
            to = %new_breakpoint,
            cols = new_cols,
            items = layout.len(),
            "breakpoint changed"
        );

        effects.push(Effect::BreakpointChange {
            breakpoint: new_breakpoint.clone(),
            cols: new_cols,
        });
        effects.push(Effect::LayoutChange {
            layout: layout.clone(),
            layouts: layouts.clone(),
        });
        state = EngineState {
            breakpoint: new_breakpoint,
            cols: new_cols,
            layout,
            width: next.width,
        };
    }

    effects.push(Effect::WidthChange {
        width: next.width,
        margin: next.margin,
        cols: new_cols,
        container_padding: next.container_padding,
    });

    Ok(Transition {
        state,
        layouts,
        effects,
    })
}

fn layouts_change(next: &ResponsiveConfig, prev_state: &EngineState) -> Transition {
    let breakpoint = prev_state.breakpoint.as_str();
    let layout = derive_layout(next, &next.layouts, breakpoint, breakpoint, prev_state.cols);

    let mut layouts = next.layouts.clone();
    layouts.insert(breakpoint.to_string(), layout.clone());

    tracing::debug!(
        target: "grid.responsive",
        breakpoint,
        items = layout.len(),
        "layouts replaced by host"
    );

    Transition {
        state: EngineState {
            layout: layout.clone(),
            ..prev_state.clone()
        },
        effects: vec![Effect::LayoutChange {
            layout,
            layouts: layouts.clone(),
        }],
        layouts,
    }
}

/// Wrap a user-driven rearrangement reported by the grid renderer.
///
/// The host always receives the full per-breakpoint map with the current
/// breakpoint's entry replaced.
#[must_use]
pub fn handle_user_layout_change(
    layouts: &LayoutsByBreakpoint,
    state: &EngineState,
    layout: Layout,
) -> Effect {
    let mut layouts = layouts.clone();
    layouts.insert(state.breakpoint.clone(), layout.clone());
    Effect::LayoutChange { layout, layouts }
}

fn target_breakpoint(config: &ResponsiveConfig) -> Result<String, ConfigError> {
    match &config.breakpoint {
        Some(bp) => Ok(bp.clone()),
        None => {
            resolve_breakpoint(&config.breakpoints, config.resolution_width()).map(str::to_string)
        }
    }
}

fn derive_layout(
    config: &ResponsiveConfig,
    layouts: &LayoutsByBreakpoint,
    target: &str,
    fallback: &str,
    cols: u32,
) -> Layout {
    let layout = find_or_generate(
        layouts,
        &config.breakpoints,
        &config.cols,
        target,
        fallback,
        cols,
        config.compact_type,
    );
    synchronize(&layout, &config.items, cols, config.compact_type)
}

// ---------------------------------------------------------------------------
// Stateful adapter
// ---------------------------------------------------------------------------

/// What the external grid renderer receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRenderProps<'a> {
    pub layout: &'a [GridItem],
    pub cols: u32,
    pub margin: [u32; 2],
    pub container_padding: Option<[u32; 2]>,
    pub row_height: u32,
    pub compact_type: CompactType,
}

/// Owns the current config and state, and delivers effects to a handler.
#[derive(Debug)]
pub struct ResponsiveGrid<H: ResponsiveHandler = NoopHandler> {
    config: ResponsiveConfig,
    state: EngineState,
    layouts: LayoutsByBreakpoint,
    handler: H,
}

impl<H: ResponsiveHandler> ResponsiveGrid<H> {
    /// Initialize and fire `on_init`.
    pub fn new(config: ResponsiveConfig, mut handler: H) -> Result<Self, ConfigError> {
        let transition = initialize(&config)?;
        for effect in &transition.effects {
            effect.dispatch(&mut handler);
        }
        Ok(Self {
            config,
            state: transition.state,
            layouts: transition.layouts,
            handler,
        })
    }

    /// Apply a new configuration.
    ///
    /// On error the previous config and state are kept and no callback fires.
    pub fn update(&mut self, next: ResponsiveConfig) -> Result<&EngineState, ConfigError> {
        let transition = on_config_change(&self.config, &next, &self.state)?;
        self.config = next;
        self.state = transition.state;
        self.layouts = transition.layouts;
        for effect in &transition.effects {
            effect.dispatch(&mut self.handler);
        }
        Ok(&self.state)
    }

    /// Record a rearrangement made by the user through the renderer.
    pub fn user_layout_change(&mut self, layout: Layout) {
        let effect = handle_user_layout_change(&self.layouts, &self.state, layout.clone());
        if let Effect::LayoutChange { layouts, .. } = &effect {
            self.layouts = layouts.clone();
        }
        self.state = EngineState {
            layout,
            ..self.state.clone()
        };
        effect.dispatch(&mut self.handler);
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &ResponsiveConfig {
        &self.config
    }

    /// Per-breakpoint layouts as of the last transition.
    #[must_use]
    pub fn layouts(&self) -> &LayoutsByBreakpoint {
        &self.layouts
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[must_use]
    pub fn render_props(&self) -> GridRenderProps<'_> {
        GridRenderProps {
            layout: &self.state.layout,
            cols: self.state.cols,
            margin: self.config.margin,
            container_padding: self.config.container_padding,
            row_height: self.config.row_height,
            compact_type: self.config.compact_type,
        }
    }
}
