//! Layout driver: seeds a coordinate store, then runs cooled force iterations over it.

use crate::algo::force::ForceEngine;
use crate::algo::init::seed_positions;
use crate::algo::radial::RingBounds;
use crate::algo::{Initializer, Variant};
use crate::config::{Frame, Schedule};
use crate::coords::{Coordinates, Displacement};
use crate::error::{Error, Result};
use crate::graph::Graph;

/// Final positions and the temperature reached after the last iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub coords: Coordinates,
    pub temperature: f64,
}

/// A layout in progress, advanced one iteration at a time.
///
/// All scratch buffers are allocated by [`LayoutState::new`]; stepping reuses them.
#[derive(Debug)]
pub struct LayoutState<'g> {
    graph: &'g Graph,
    frame: Frame,
    variant: Variant,
    engine: ForceEngine,
    coords: Coordinates,
    backup: Coordinates,
    disp: Displacement,
    rings: Option<RingBounds>,
    temperature: f64,
    cooling_factor: f64,
    steps_taken: usize,
}

impl<'g> LayoutState<'g> {
    pub fn new(
        graph: &'g Graph,
        frame: Frame,
        schedule: &Schedule,
        initializer: Initializer,
        variant: Variant,
        weighted: bool,
    ) -> Result<Self> {
        graph.validate()?;
        frame.validate()?;
        schedule.validate()?;
        variant.validate_for(graph.vertex_count)?;

        let n = graph.vertex_count;
        let mut coords = Coordinates::zeros(n);
        seed_positions(initializer, graph, &frame, &variant, &mut coords)?;

        let rings = match &variant {
            Variant::Radial(annotation) => Some(RingBounds::new(annotation.num_rings())),
            Variant::Plain | Variant::Smooth(_) => None,
        };

        Ok(Self {
            graph,
            engine: ForceEngine::new(&frame, n, weighted),
            frame,
            variant,
            backup: coords.clone(),
            coords,
            disp: Displacement::new(n),
            rings,
            temperature: schedule.initial_temperature,
            cooling_factor: schedule.cooling_factor,
            steps_taken: 0,
        })
    }

    /// Runs one iteration and returns the cooled temperature.
    ///
    /// If any coordinate turns non-finite the positions are rolled back to the ones held before
    /// the iteration, the temperature is left unchanged, and [`Error::NumericalBreakdown`] is
    /// returned.
    pub fn step(&mut self) -> Result<f64> {
        self.backup.copy_from(&self.coords);
        self.engine.step(
            &self.variant,
            self.graph,
            &mut self.coords,
            &mut self.disp,
            self.temperature,
        );
        if let (Variant::Radial(annotation), Some(bounds)) = (&self.variant, self.rings.as_mut()) {
            bounds.apply(annotation, &mut self.coords, &self.frame);
        }

        if let Some(vertex) = self.coords.first_non_finite() {
            self.coords.copy_from(&self.backup);
            return Err(Error::NumericalBreakdown {
                step: self.steps_taken,
                vertex,
                temperature: self.temperature,
                last_good: Box::new(self.coords.clone()),
            });
        }

        self.temperature *= self.cooling_factor;
        self.steps_taken += 1;
        tracing::trace!(
            step = self.steps_taken,
            temperature = self.temperature,
            "layout iteration"
        );
        Ok(self.temperature)
    }

    /// Runs `steps` iterations and returns the final temperature.
    pub fn run(&mut self, steps: usize) -> Result<f64> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self.temperature)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Overrides the current temperature, e.g. to reheat an interactive layout.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(Error::invalid_schedule(format!(
                "temperature must be positive, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(())
    }

    pub fn cooling_factor(&self) -> f64 {
        self.cooling_factor
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Base ideal edge length `sqrt(area / n)`.
    pub fn ideal_length(&self) -> f64 {
        self.engine.ideal_length()
    }

    pub fn into_layout(self) -> Layout {
        Layout {
            coords: self.coords,
            temperature: self.temperature,
        }
    }
}

/// Seeds positions with `initializer` and runs `schedule.steps` iterations.
pub fn layout(
    graph: &Graph,
    frame: Frame,
    schedule: &Schedule,
    initializer: Initializer,
    variant: Variant,
    weighted: bool,
) -> Result<Layout> {
    let timing_enabled = std::env::var("TAMARIN_LAYOUT_TIMING").ok().as_deref() == Some("1");
    let total_start = timing_enabled.then(std::time::Instant::now);

    tracing::debug!(
        vertices = graph.vertex_count,
        edges = graph.edges.len(),
        variant = variant.name(),
        initializer = initializer.name(),
        steps = schedule.steps,
        weighted,
        "layout start"
    );

    let init_start = timing_enabled.then(std::time::Instant::now);
    let mut state = LayoutState::new(graph, frame, schedule, initializer, variant, weighted)?;
    let init_elapsed = init_start.map(|s| s.elapsed());

    let iterations_start = timing_enabled.then(std::time::Instant::now);
    let temperature = state.run(schedule.steps)?;
    let iterations_elapsed = iterations_start.map(|s| s.elapsed());

    tracing::debug!(
        steps = state.steps_taken(),
        temperature,
        "layout finished"
    );
    if let Some(s) = total_start {
        tracing::debug!(
            total = ?s.elapsed(),
            init = ?init_elapsed.unwrap_or_default(),
            iterations = ?iterations_elapsed.unwrap_or_default(),
            "layout timing"
        );
    }

    Ok(state.into_layout())
}
