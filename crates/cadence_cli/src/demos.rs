//! Demo sequences

use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use cadence_runtime::{Curve, SequenceConfig, Stage, Timeline};
use cadence_timeline::{Defaults, Easing, Step};
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Demo {
    /// Two color changes, the second after a pause
    Simple,
    /// Shapes slide in asynchronously while a form fades in
    Staggered,
    /// A step, an explicit wait, then another step
    Wait,
}

/// Prints dispatches with wall-clock time and keeps the stage clock in step
#[derive(Clone)]
pub struct Reporter {
    started: Instant,
    stage: Rc<Stage>,
}

impl Reporter {
    pub fn new(stage: Rc<Stage>) -> Self {
        Self {
            started: Instant::now(),
            stage,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Bring the stage clock up to wall-clock time
    pub fn sync(&self) {
        self.stage.tick(self.elapsed() - self.stage.now());
    }

    pub fn note(&self, what: &str) {
        self.sync();
        println!("{:>8.3}s  {what}", self.elapsed());
    }
}

fn base_timeline(config: Option<&SequenceConfig>, defaults: Defaults<Curve>) -> Result<Timeline> {
    Ok(match config {
        Some(config) => config.timeline()?,
        None => Timeline::with_defaults(defaults)?,
    })
}

impl Demo {
    /// Build the demo's timeline against `stage`
    pub fn build(
        self,
        stage: &Rc<Stage>,
        reporter: &Reporter,
        config: Option<&SequenceConfig>,
    ) -> Result<Timeline> {
        match self {
            Demo::Simple => simple(stage, reporter, config),
            Demo::Staggered => staggered(stage, reporter, config),
            Demo::Wait => wait(stage, reporter, config),
        }
    }
}

fn simple(stage: &Rc<Stage>, reporter: &Reporter, config: Option<&SequenceConfig>) -> Result<Timeline> {
    let hue = stage.insert("hue", 120.0);
    let mut timeline = base_timeline(config, Defaults::system())?;

    let (s, r) = (stage.clone(), reporter.clone());
    timeline.add(
        Step::new(move || {
            r.note("hue -> red");
            s.set(hue, 0.0);
        })
        .label("red")
        .duration(1.0)
        .easing(Easing::EaseInOut),
    )?;

    let (s, r) = (stage.clone(), reporter.clone());
    timeline.add(
        Step::new(move || {
            r.note("hue -> blue");
            s.set(hue, 240.0);
        })
        .label("blue")
        .delay(2.0)
        .duration(0.5),
    )?;

    Ok(timeline)
}

fn staggered(stage: &Rc<Stage>, reporter: &Reporter, config: Option<&SequenceConfig>) -> Result<Timeline> {
    let big_y = stage.insert("big.y", -10.0);
    let big_size = stage.insert("big.size", 250.0);
    let small_y = stage.insert("small.y", 900.0);
    let small_size = stage.insert("small.size", 250.0);
    let form_opacity = stage.insert("form.opacity", 0.0);

    let mut timeline = base_timeline(config, Defaults::system().with_delay(0.5))?;

    let (s, r) = (stage.clone(), reporter.clone());
    timeline.add_async(
        Step::new(move || {
            r.note("big diamond grows");
            s.set(big_y, -100.0);
            s.set(big_size, 600.0);
        })
        .label("big")
        .duration(0.4)
        .easing(Easing::EaseInOut),
    )?;

    let (s, r) = (stage.clone(), reporter.clone());
    timeline.add_async(
        Step::new(move || {
            r.note("small diamond rises");
            s.set(small_y, 0.0);
            s.set(small_size, 380.0);
        })
        .label("small")
        .duration(0.5)
        .easing(Easing::EaseInOut),
    )?;

    let (s, r) = (stage.clone(), reporter.clone());
    timeline.add(
        Step::new(move || {
            r.note("form fades in");
            // The form uses its own, longer fade inside the step.
            s.with_animation(Curve::EASE_IN_OUT, 1.0, || s.set(form_opacity, 1.0));
        })
        .label("form"),
    )?;

    Ok(timeline)
}

fn wait(stage: &Rc<Stage>, reporter: &Reporter, config: Option<&SequenceConfig>) -> Result<Timeline> {
    let x = stage.insert("x", 0.0);
    let mut timeline = base_timeline(config, Defaults::system())?;

    let (s, r) = (stage.clone(), reporter.clone());
    timeline
        .add(
            Step::new(move || {
                r.note("slide right");
                s.set(x, 100.0);
            })
            .label("right")
            .duration(1.0)
            .easing(Easing::Linear),
        )?
        .wait(3.0)?;

    let (s, r) = (stage.clone(), reporter.clone());
    timeline.add(
        Step::new(move || {
            r.note("slide back");
            s.set(x, 0.0);
        })
        .label("back")
        .duration(0.5)
        .easing(Easing::Linear),
    )?;

    Ok(timeline)
}
