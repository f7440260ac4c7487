use crate::algo::radial::bfs_ring_levels;
use crate::algo::{Initializer, RadialAnnotation, SmoothRings, Variant};
use crate::driver::{Layout, layout};
use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};

/// Drawing rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 10_000.0,
            height: 10_000.0,
        }
    }
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::invalid_schedule(format!(
                    "frame {name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Iteration budget and cooling schedule: `T_{i+1} = cooling_factor * T_i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub steps: usize,
    pub initial_temperature: f64,
    pub cooling_factor: f64,
}

impl Schedule {
    /// Schedule with the default temperature and cooling factor for `frame` and `steps`.
    pub fn new(steps: usize, frame: &Frame) -> Self {
        Self {
            steps,
            initial_temperature: default_initial_temperature(frame),
            cooling_factor: default_cooling_factor(steps),
        }
    }

    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    pub fn with_cooling_factor(mut self, cooling_factor: f64) -> Self {
        self.cooling_factor = cooling_factor;
        self
    }

    /// `T_0 * cooling_factor^steps`.
    pub fn temperature_after(&self, steps: usize) -> f64 {
        let exp = i32::try_from(steps).unwrap_or(i32::MAX);
        self.initial_temperature * self.cooling_factor.powi(exp)
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.initial_temperature;
        if !(t.is_finite() && t > 0.0) {
            return Err(Error::invalid_schedule(format!(
                "initial temperature must be positive, got {t}"
            )));
        }
        let a = self.cooling_factor;
        if !(a > 0.0 && a < 1.0) {
            return Err(Error::invalid_schedule(format!(
                "cooling factor must lie in (0, 1), got {a}"
            )));
        }
        Ok(())
    }
}

/// A tenth of the frame diagonal.
pub fn default_initial_temperature(frame: &Frame) -> f64 {
    (frame.width * frame.width + frame.height * frame.height).sqrt() / 10.0
}

/// Cools by a factor of 1000 over `steps` iterations. Zero steps cool like one.
pub fn default_cooling_factor(steps: usize) -> f64 {
    ((10.0f64 / 10_000.0).ln() / (steps.max(1) as f64)).exp()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitializerKind {
    Random,
    #[default]
    CircularOriginal,
    CircularRandom,
    CircularCrossingReduced,
    Rings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantKind {
    #[default]
    Plain,
    Radial,
    Smooth,
}

/// Serializable description of one layout run.
///
/// Every field is optional in the JSON form; missing values take the defaults below. Typed inputs
/// for [`layout`] are resolved against a concrete graph by [`LayoutConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub steps: usize,
    /// Defaults to a tenth of the frame diagonal.
    pub initial_temperature: Option<f64>,
    /// Defaults to cooling by a factor of 1000 over `steps`.
    pub cooling_factor: Option<f64>,
    pub frame_width: f64,
    pub frame_height: f64,
    /// Required by the `random` and `circularRandom` initializers.
    pub seed: Option<u64>,
    /// Defaults to `frame_width / rings / 2`.
    pub ring_radial_distance: Option<f64>,
    pub initializer: InitializerKind,
    pub variant: VariantKind,
    pub weighted: bool,
    /// Explicit ring per vertex. Takes precedence over `centre`.
    pub levels: Option<Vec<usize>>,
    /// BFS centre used to derive rings when `levels` is absent.
    pub centre: Option<usize>,
    /// Ring cap for BFS-derived levels.
    pub num_rings: usize,
    /// `[centre, same ring, across rings]` ideal lengths for the smooth variant. Defaults to the
    /// ring radial distance for all three.
    pub smooth_lengths: Option<[f64; 3]>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let frame = Frame::default();
        Self {
            steps: 100,
            initial_temperature: None,
            cooling_factor: None,
            frame_width: frame.width,
            frame_height: frame.height,
            seed: None,
            ring_radial_distance: None,
            initializer: InitializerKind::default(),
            variant: VariantKind::default(),
            weighted: false,
            levels: None,
            centre: None,
            num_rings: 6,
            smooth_lengths: None,
        }
    }
}

/// Typed inputs for [`layout`].
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub frame: Frame,
    pub schedule: Schedule,
    pub initializer: Initializer,
    pub variant: Variant,
    pub weighted: bool,
}

impl LayoutConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn frame(&self) -> Frame {
        Frame::new(self.frame_width, self.frame_height)
    }

    pub fn schedule(&self) -> Schedule {
        let mut schedule = Schedule::new(self.steps, &self.frame());
        if let Some(t) = self.initial_temperature {
            schedule = schedule.with_initial_temperature(t);
        }
        if let Some(a) = self.cooling_factor {
            schedule = schedule.with_cooling_factor(a);
        }
        schedule
    }

    pub fn initializer(&self) -> Result<Initializer> {
        let seed = || {
            self.seed.ok_or_else(|| {
                Error::invalid_schedule(format!(
                    "the {:?} initializer needs a seed",
                    self.initializer
                ))
            })
        };
        Ok(match self.initializer {
            InitializerKind::Random => Initializer::Random { seed: seed()? },
            InitializerKind::CircularOriginal => Initializer::CircularOriginal,
            InitializerKind::CircularRandom => Initializer::CircularRandom { seed: seed()? },
            InitializerKind::CircularCrossingReduced => Initializer::CircularCrossingReduced,
            InitializerKind::Rings => Initializer::Rings,
        })
    }

    pub fn variant(&self, graph: &Graph) -> Result<Variant> {
        if self.variant == VariantKind::Plain {
            return Ok(Variant::Plain);
        }
        let levels = self.ring_levels(graph)?;
        let rings = levels.iter().max().map_or(1, |m| m + 1);
        let ring_radial_distance = self
            .ring_radial_distance
            .unwrap_or(self.frame_width / (rings as f64) / 2.0);

        match self.variant {
            VariantKind::Plain => Ok(Variant::Plain),
            VariantKind::Radial => Ok(Variant::Radial(RadialAnnotation::from_levels(
                levels,
                ring_radial_distance,
            )?)),
            VariantKind::Smooth => {
                let lengths = self.smooth_lengths.unwrap_or([ring_radial_distance; 3]);
                Ok(Variant::Smooth(SmoothRings::new(levels, lengths)?))
            }
        }
    }

    fn ring_levels(&self, graph: &Graph) -> Result<Vec<usize>> {
        if let Some(levels) = &self.levels {
            return Ok(levels.clone());
        }
        match self.centre {
            Some(centre) => bfs_ring_levels(graph, centre, self.num_rings),
            None => Err(Error::invalid_levels(format!(
                "the {:?} variant needs either `levels` or a `centre`",
                self.variant
            ))),
        }
    }

    pub fn resolve(&self, graph: &Graph) -> Result<ResolvedConfig> {
        Ok(ResolvedConfig {
            frame: self.frame(),
            schedule: self.schedule(),
            initializer: self.initializer()?,
            variant: self.variant(graph)?,
            weighted: self.weighted,
        })
    }

    pub fn run(&self, graph: &Graph) -> Result<Layout> {
        let r = self.resolve(graph)?;
        layout(
            graph,
            r.frame,
            &r.schedule,
            r.initializer,
            r.variant,
            r.weighted,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_the_frame() {
        let frame = Frame::new(3000.0, 4000.0);
        let s = Schedule::new(100, &frame);
        assert_eq!(s.initial_temperature, 500.0);
        assert!((s.temperature_after(100) / s.initial_temperature - 0.001).abs() < 1e-12);
    }

    #[test]
    fn zero_steps_still_get_a_valid_cooling_factor() {
        let a = default_cooling_factor(0);
        assert!((a - 0.001).abs() < 1e-15);
        assert!(Schedule::new(0, &Frame::default()).validate().is_ok());
    }

    #[test]
    fn schedule_validation() {
        let frame = Frame::default();
        assert!(
            Schedule::new(10, &frame)
                .with_cooling_factor(1.0)
                .validate()
                .is_err()
        );
        assert!(
            Schedule::new(10, &frame)
                .with_cooling_factor(0.0)
                .validate()
                .is_err()
        );
        assert!(
            Schedule::new(10, &frame)
                .with_initial_temperature(-1.0)
                .validate()
                .is_err()
        );
        assert!(Frame::new(0.0, 10.0).validate().is_err());
        assert!(Frame::new(10.0, f64::INFINITY).validate().is_err());
    }
}
