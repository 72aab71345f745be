use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::session_edit::SessionEdit;
use crate::controllers::interactive::errors::session::SessionError;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::FlamePresenterPort;
use crate::controllers::interactive::scheduler::{TickDecision, TickScheduler};
use crate::controllers::interactive::session::Session;
use crate::core::actions::accumulate_samples::accumulate_samples_parallel_rayon::{
    AccumulateError, accumulate_samples_parallel_rayon_cancelable,
};
use crate::core::colour_maps::source::ColourMapSource;
use crate::core::data::accumulation_buffers::AccumulationBuffers;
use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct SharedState {
    session: Mutex<Session>,
    /// Mirrors the session generation so passes can poll it without the lock.
    generation: AtomicU64,
    last_presented_generation: AtomicU64,
    scheduler: Mutex<TickScheduler>,
    wake: Condvar,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn FlamePresenterPort>,
}

impl SharedState {
    fn apply(&self, edit: SessionEdit) -> Result<u64, SessionError> {
        let (generation, interval) = {
            let mut session = lock(&self.session);
            session.apply(edit)?;
            let generation = session.generation();
            self.generation.store(generation, Ordering::SeqCst);
            (generation, session.options().tick_interval())
        };

        lock(&self.scheduler).set_interval(interval, Instant::now());
        self.wake.notify_one();

        Ok(generation)
    }
}

/// Runs the tick cadence for one [`Session`] on a worker thread.
///
/// Each tick accumulates a pass into a private buffer without holding the
/// session lock. The pass is merged only if no edit arrived meanwhile;
/// otherwise it is cancelled or dropped.
pub struct FlameController {
    shared: Arc<SharedState>,
    colour_map_source: Arc<dyn ColourMapSource>,
    worker: Option<JoinHandle<()>>,
}

impl FlameController {
    /// Starts the worker with the cadence already running.
    pub fn new(
        session: Session,
        presenter_port: Arc<dyn FlamePresenterPort>,
        colour_map_source: Arc<dyn ColourMapSource>,
    ) -> Self {
        let generation = session.generation();
        let mut scheduler = TickScheduler::new(session.options().tick_interval());
        scheduler.start(Instant::now());

        let shared = Arc::new(SharedState {
            session: Mutex::new(session),
            generation: AtomicU64::new(generation),
            last_presented_generation: AtomicU64::new(0),
            scheduler: Mutex::new(scheduler),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        info!("flame controller started at generation {}", generation);

        Self {
            shared,
            colour_map_source,
            worker: Some(worker),
        }
    }

    /// Applies an edit, starting a new generation and restarting the cadence.
    ///
    /// Any pass still running for the previous generation is cancelled.
    pub fn apply(&self, edit: SessionEdit) -> Result<u64, SessionError> {
        let generation = self.shared.apply(edit)?;
        debug!("edit applied, generation {}", generation);
        Ok(generation)
    }

    /// Loads a palette by name on its own thread.
    ///
    /// The current palette keeps rendering until the load succeeds. A failed
    /// load is reported to the presenter and otherwise ignored.
    pub fn load_colour_map(&self, name: &str) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let source = Arc::clone(&self.colour_map_source);
        let name = name.to_string();

        thread::spawn(move || match source.load(&name) {
            Ok(colour_map) => {
                match shared.apply(SessionEdit::ReplaceColourMap(Arc::new(colour_map))) {
                    Ok(generation) => {
                        info!("colour map '{}' loaded, generation {}", name, generation);
                        shared
                            .presenter_port
                            .present(RenderEvent::ColourMapLoaded { name, generation });
                    }
                    Err(err) => {
                        warn!("colour map '{}' rejected: {}", name, err);
                        shared.presenter_port.present(RenderEvent::ColourMapLoadFailed {
                            name,
                            message: err.to_string(),
                        });
                    }
                }
            }
            Err(err) => {
                warn!("failed to load colour map '{}': {}", name, err);
                shared.presenter_port.present(RenderEvent::ColourMapLoadFailed {
                    name,
                    message: err.to_string(),
                });
            }
        })
    }

    /// Pauses the cadence. Edits restart it.
    pub fn stop(&self) {
        lock(&self.shared.scheduler).stop();
        self.shared.wake.notify_one();
    }

    pub fn start(&self) {
        lock(&self.shared.scheduler).start(Instant::now());
        self.shared.wake.notify_one();
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
            info!("flame controller stopped");
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn last_presented_generation(&self) -> u64 {
        self.shared
            .last_presented_generation
            .load(Ordering::Acquire)
    }

    /// Reads the session under its lock.
    pub fn with_session<T>(&self, read: impl FnOnce(&Session) -> T) -> T {
        read(&lock(&self.shared.session))
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            {
                let mut scheduler = lock(&shared.scheduler);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    match scheduler.poll(Instant::now()) {
                        TickDecision::Tick => break,
                        TickDecision::Wait(delay) => {
                            scheduler = shared
                                .wake
                                .wait_timeout(scheduler, delay)
                                .unwrap_or_else(PoisonError::into_inner)
                                .0;
                        }
                        TickDecision::Stopped => {
                            scheduler = shared
                                .wake
                                .wait(scheduler)
                                .unwrap_or_else(PoisonError::into_inner);
                        }
                    }
                }
            }

            if let Some(frame) = Self::run_pass(shared) {
                if frame.generation != shared.generation.load(Ordering::Acquire) {
                    trace!("not presenting stale frame {}", frame.generation);
                    continue;
                }

                shared
                    .last_presented_generation
                    .store(frame.generation, Ordering::Release);
                shared.presenter_port.present(RenderEvent::Frame(frame));
            }
        }
    }

    fn run_pass(shared: &SharedState) -> Option<FrameData> {
        let job = lock(&shared.session).begin_pass();

        let cancel_token = || {
            shared.shutdown.load(Ordering::Relaxed)
                || job.generation != shared.generation.load(Ordering::Relaxed)
        };

        let start = Instant::now();
        let mut partial = AccumulationBuffers::new(job.resolution);
        let mut rng = StdRng::seed_from_u64(job.seed);

        let stats = match accumulate_samples_parallel_rayon_cancelable(
            &job.definition,
            &mut partial,
            &job.params,
            &mut rng,
            &cancel_token,
        ) {
            Ok(stats) => stats,
            Err(AccumulateError::Cancelled(_)) => {
                trace!("pass for generation {} cancelled", job.generation);
                return None;
            }
            Err(AccumulateError::Buffers(err)) => {
                warn!("pass for generation {} failed: {}", job.generation, err);
                return None;
            }
        };

        let mut session = lock(&shared.session);

        match session.commit_pass(job.generation, &partial) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(err) => {
                warn!("pass for generation {} not merged: {}", job.generation, err);
                return None;
            }
        }

        let pixel_buffer = session.render().clone();
        let render_duration = start.elapsed();

        debug!(
            "generation {}: plotted {}, discarded {} in {:?}",
            job.generation, stats.plotted, stats.discarded, render_duration
        );

        Some(FrameData {
            generation: job.generation,
            pixel_buffer,
            render_duration,
            stats,
        })
    }
}

impl Drop for FlameController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::data::options::FlameOptions;
    use crate::core::colour_maps::colour_map::ColourMap;
    use crate::core::colour_maps::errors::ColourMapLoadError;
    use crate::core::colour_maps::factory::colour_map_factory;
    use crate::core::colour_maps::kinds::ColourMapKind;
    use crate::core::colour_maps::source::BuiltinColourMapSource;
    use crate::core::data::colour::Colour;
    use crate::core::data::resolution::Resolution;
    use crate::core::flame::definition::FlameDefinition;
    use std::time::Duration;
    use test_log::test;

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl FlamePresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct FailingSource;

    impl ColourMapSource for FailingSource {
        fn load(&self, name: &str) -> Result<ColourMap, ColourMapLoadError> {
            Err(ColourMapLoadError::UnknownName(name.to_string()))
        }
    }

    fn wait_for_frames(
        sink: &MockPresenterPort,
        min_generation: u64,
        timeout: Duration,
    ) -> Vec<FrameData> {
        let start = Instant::now();
        let mut frames = Vec::new();
        loop {
            for event in sink.take_events() {
                if let RenderEvent::Frame(frame) = event {
                    frames.push(frame);
                }
            }
            if frames.iter().any(|f| f.generation >= min_generation) {
                return frames;
            }
            if start.elapsed() >= timeout {
                return frames;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn session() -> Session {
        let options = FlameOptions {
            orbits_per_pass: 100,
            warmup_steps: 5,
            plotted_steps: 20,
            width: 12,
            height: 12,
            tick_interval_ms: 1,
            ..FlameOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(21);
        let colour_map = Arc::new(colour_map_factory(ColourMapKind::Fire));
        let definition = FlameDefinition::random(&mut rng, colour_map);

        Session::new(definition, options, rng).unwrap()
    }

    fn controller_with(
        source: Arc<dyn ColourMapSource>,
    ) -> (FlameController, Arc<MockPresenterPort>) {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let controller = FlameController::new(
            session(),
            Arc::clone(&presenter_port) as Arc<dyn FlamePresenterPort>,
            source,
        );
        (controller, presenter_port)
    }

    fn controller() -> (FlameController, Arc<MockPresenterPort>) {
        controller_with(Arc::new(BuiltinColourMapSource))
    }

    #[test]
    fn test_cadence_emits_frames() {
        let (mut controller, presenter_port) = controller();

        let frames = wait_for_frames(&presenter_port, 1, Duration::from_secs(2));

        assert!(!frames.is_empty(), "expected at least one frame");
        for frame in &frames {
            assert_eq!(frame.generation, 1);
            assert_eq!(frame.pixel_buffer.resolution(), Resolution::new(12, 12).unwrap());
            assert_eq!(frame.stats.plotted + frame.stats.discarded, 2000);
        }
        assert_eq!(controller.last_presented_generation(), 1);

        controller.shutdown();
    }

    #[test]
    fn test_frames_refine_progressively() {
        let (mut controller, presenter_port) = controller();
        let mut seen = 0;
        let start = Instant::now();

        while seen < 3 && start.elapsed() < Duration::from_secs(2) {
            seen += wait_for_frames(&presenter_port, 1, Duration::from_millis(200)).len();
        }
        controller.stop();
        assert!(seen >= 3, "expected three frames, saw {}", seen);

        let total_hits = controller.with_session(|s| s.buffers().total_hits());
        let max_pass = controller.with_session(|s| s.params().max_samples());
        assert!(total_hits > 0);
        assert!(total_hits <= max_pass * seen as u64 + max_pass);

        controller.shutdown();
    }

    #[test]
    fn test_edit_starts_a_new_generation() {
        let (mut controller, presenter_port) = controller();
        wait_for_frames(&presenter_port, 1, Duration::from_secs(2));

        let generation = controller
            .apply(SessionEdit::SetResolution {
                width: 6,
                height: 4,
            })
            .unwrap();
        assert_eq!(generation, 2);
        assert_eq!(controller.generation(), 2);

        let frames = wait_for_frames(&presenter_port, 2, Duration::from_secs(2));
        let newest = frames
            .iter()
            .rev()
            .find(|f| f.generation == 2)
            .expect("expected a frame for the new generation");

        assert_eq!(newest.pixel_buffer.resolution(), Resolution::new(6, 4).unwrap());

        controller.shutdown();
    }

    #[test]
    fn test_no_stale_frame_follows_a_newer_one() {
        let (mut controller, presenter_port) = controller();

        for orbits in 1..=5 {
            controller.apply(SessionEdit::SetOrbits(orbits * 10)).unwrap();
        }

        let frames = wait_for_frames(&presenter_port, 6, Duration::from_secs(2));
        controller.stop();

        assert!(frames.iter().any(|f| f.generation == 6));
        for pair in frames.windows(2) {
            assert!(pair[0].generation <= pair[1].generation);
        }

        controller.shutdown();
    }

    #[test]
    fn test_rejected_edit_keeps_the_generation() {
        let (mut controller, _presenter_port) = controller();

        let result = controller.apply(SessionEdit::SetColourWeight {
            index: 0,
            weight: -0.5,
        });

        assert!(result.is_err());
        assert_eq!(controller.generation(), 1);

        controller.shutdown();
    }

    #[test]
    fn test_stopped_controller_emits_nothing() {
        let (mut controller, presenter_port) = controller();
        controller.stop();
        thread::sleep(Duration::from_millis(50));
        presenter_port.take_events();

        thread::sleep(Duration::from_millis(50));

        assert!(presenter_port.take_events().is_empty());

        controller.shutdown();
    }

    #[test]
    fn test_colour_map_load_replaces_the_palette() {
        let (mut controller, presenter_port) = controller();

        controller.load_colour_map("viridis").join().unwrap();

        let events = presenter_port.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            RenderEvent::ColourMapLoaded { name, generation: 2 } if name == "viridis"
        )));
        let active = controller.with_session(|s| s.definition().colour_map().as_ref().clone());
        assert_eq!(active, colour_map_factory(ColourMapKind::Viridis));
        assert_eq!(controller.generation(), 2);

        controller.shutdown();
    }

    #[test]
    fn test_colour_map_load_failure_keeps_the_palette() {
        let (mut controller, presenter_port) = controller_with(Arc::new(FailingSource));

        controller.load_colour_map("missing").join().unwrap();
        controller.stop();

        let failures: Vec<_> = presenter_port
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                RenderEvent::ColourMapLoadFailed { name, message } => Some((name, message)),
                _ => None,
            })
            .collect();

        assert_eq!(
            failures,
            vec![(
                "missing".to_string(),
                "no colour map named 'missing'".to_string()
            )]
        );
        let active = controller.with_session(|s| s.definition().colour_map().as_ref().clone());
        assert_eq!(active, colour_map_factory(ColourMapKind::Fire));
        assert_eq!(controller.generation(), 1);

        controller.shutdown();
    }

    #[test]
    fn test_background_edit_is_visible_in_options() {
        let (mut controller, _presenter_port) = controller();

        controller
            .apply(SessionEdit::SetBackground(Colour::WHITE))
            .unwrap();

        assert_eq!(
            controller.with_session(|s| s.options().background),
            Colour::WHITE
        );

        controller.shutdown();
    }

    #[test]
    fn test_drop_joins_the_worker() {
        let (controller, presenter_port) = controller();
        wait_for_frames(&presenter_port, 1, Duration::from_secs(2));

        drop(controller);
        presenter_port.take_events();
        thread::sleep(Duration::from_millis(20));

        assert!(presenter_port.take_events().is_empty());
    }
}
