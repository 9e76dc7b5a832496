use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::OnceLock;

use crate::location::ProfileLocation;
use crate::record::{ProfileRecord, RecordType};
use crate::registry::LocationRegistry;
use crate::ring::{RecordRing, DEFAULT_CAPACITY};

/// Process-wide profiler state. There is exactly one: profiling is a
/// cross-cutting concern, not something call sites thread a handle through —
/// the same reasoning that makes `tracing`'s default subscriber global.
pub struct Profiler {
    ring: RecordRing,
    registry: LocationRegistry,
    active: AtomicBool,
    start_cycles: AtomicU64,
}

static PROFILER: OnceLock<Profiler> = OnceLock::new();

/// Returns the global profiler, creating it with the default ring capacity
/// on first access.
pub fn global() -> &'static Profiler {
    PROFILER.get_or_init(|| Profiler::with_capacity(DEFAULT_CAPACITY))
}

impl Profiler {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: RecordRing::new(capacity),
            registry: LocationRegistry::new(),
            active: AtomicBool::new(false),
            start_cycles: AtomicU64::new(0),
        }
    }

    /// Marks the run as started and records a `ProfilerStart` sentinel, but
    /// only on the actual 0→1 transition: calling `start` while already
    /// active is a no-op, so a second `start` can never push a second
    /// `ProfilerStart` sentinel for `tree::reconstruct`'s stack machine to
    /// choke on.
    pub fn start(&self) {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let now = have_clock::read();
            self.start_cycles.store(now, Ordering::Relaxed);
            self.ring.push(ProfileRecord::new(RecordType::ProfilerStart, now, current_thread_id(), 0));
        }
    }

    /// Marks the run as stopped, records a `ProfilerEnd` sentinel, and
    /// drains the ring into an owned `Vec` for reconstruction — but only on
    /// the actual 1→0 transition. Returns `None` if the profiler was already
    /// inactive.
    pub fn stop_and_collect(&self) -> Option<Vec<ProfileRecord>> {
        self.active
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        let now = have_clock::read();
        self.ring.push(ProfileRecord::new(RecordType::ProfilerEnd, now, current_thread_id(), 0));
        Some(self.ring.drain())
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// Interns `location`, pushes a `SectionBegin` record, and returns the
    /// interned id so the matching `end` (or a [`Section`] guard's `Drop`)
    /// can push its `SectionEnd` with the exact same identity. A no-op when
    /// the profiler isn't active: no record is pushed and `u32::MAX` is
    /// returned as a sentinel id, which is safe because `end` also gates on
    /// `is_active` and will never push a record keyed by it.
    pub fn begin(&self, location: ProfileLocation) -> u32 {
        if !self.is_active() {
            return u32::MAX;
        }
        let id = self.registry.intern(location);
        self.ring.push(ProfileRecord::new(
            RecordType::SectionBegin,
            have_clock::read(),
            current_thread_id(),
            id,
        ));
        id
    }

    /// Pushes a `SectionEnd` record for the section identified by
    /// `location_id`, as previously returned by `begin`. A no-op when the
    /// profiler isn't active.
    pub fn end(&self, location_id: u32) {
        if !self.is_active() {
            return;
        }
        self.ring.push(ProfileRecord::new(
            RecordType::SectionEnd,
            have_clock::read(),
            current_thread_id(),
            location_id,
        ));
    }

    /// Starts a scoped section; the returned [`Section`] guard pushes the
    /// matching `end` when dropped, including on early return or panic
    /// unwind.
    pub fn section(&self, location: ProfileLocation) -> Section<'_> {
        let location_id = self.begin(location);
        Section {
            profiler: self,
            location_id,
        }
    }
}

fn current_thread_id() -> i32 {
    // Cheap, non-portable-but-sufficient numeric thread identity: the
    // address of a thread-local byte is unique and stable per thread for
    // the thread's lifetime.
    thread_local! {
        static MARKER: u8 = 0;
    }
    MARKER.with(|m| m as *const u8 as i32)
}

/// RAII guard returned by [`Profiler::section`]. Pushes `SectionEnd` for the
/// exact `location_id` captured at `begin` time when dropped, so the
/// identity recorded at the start and end of a scope always matches — the
/// same "acquire in constructor, release in `Drop`" idiom the workspace uses
/// for its mmap-backed file handles.
pub struct Section<'a> {
    profiler: &'a Profiler,
    location_id: u32,
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        self.profiler.end(self.location_id);
    }
}

/// Captures `(file!(), line!(), module_path!())` plus an optional section
/// name and starts a scoped section against the global profiler. Expands to
/// a `Section` guard binding; let it live for the scope you want timed.
#[macro_export]
macro_rules! profile_section {
    () => {
        $crate::profile_section!(None)
    };
    ($name:expr) => {
        $crate::profiler::global().section($crate::location::ProfileLocation::new(
            file!(),
            line!(),
            module_path!(),
            Some($name),
        ))
    };
}

/// Begins a section without an RAII guard; the caller is responsible for
/// passing the returned id to a later [`profile_end!`] at the matching call
/// site, or for preferring [`profile_section!`] instead.
#[macro_export]
macro_rules! profile_begin {
    () => {
        $crate::profiler::global().begin($crate::location::ProfileLocation::new(
            file!(),
            line!(),
            module_path!(),
            None,
        ))
    };
    ($name:expr) => {
        $crate::profiler::global().begin($crate::location::ProfileLocation::new(
            file!(),
            line!(),
            module_path!(),
            Some($name),
        ))
    };
}

#[macro_export]
macro_rules! profile_end {
    ($id:expr) => {
        $crate::profiler::global().end($id)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_end_round_trip_through_stop_and_collect() {
        let profiler = Profiler::with_capacity(64);
        profiler.start();
        let id = profiler.begin(ProfileLocation::new("f.rs", 1, "f", None));
        profiler.end(id);
        let records = profiler.stop_and_collect().unwrap();
        // ProfilerStart, SectionBegin, SectionEnd, ProfilerEnd
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].record_type, RecordType::ProfilerStart);
        assert_eq!(records[1].record_type, RecordType::SectionBegin);
        assert_eq!(records[2].record_type, RecordType::SectionEnd);
        assert_eq!(records[3].record_type, RecordType::ProfilerEnd);
        assert_eq!(records[1].location_id, records[2].location_id);
    }

    #[test]
    fn section_guard_pushes_end_on_drop() {
        let profiler = Profiler::with_capacity(64);
        profiler.start();
        {
            let _section = profiler.section(ProfileLocation::new("f.rs", 2, "f", Some("work")));
        }
        let records = profiler.stop_and_collect().unwrap();
        assert_eq!(records[1].record_type, RecordType::SectionBegin);
        assert_eq!(records[2].record_type, RecordType::SectionEnd);
    }

    #[test]
    fn double_start_pushes_only_one_start_sentinel() {
        let profiler = Profiler::with_capacity(64);
        profiler.start();
        profiler.start();
        let records = profiler.stop_and_collect().unwrap();
        let starts = records
            .iter()
            .filter(|r| r.record_type == RecordType::ProfilerStart)
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn begin_and_end_are_no_ops_when_never_started() {
        let profiler = Profiler::with_capacity(64);
        let id = profiler.begin(ProfileLocation::new("f.rs", 1, "f", None));
        profiler.end(id);
        assert!(profiler.ring.is_empty());
    }

    #[test]
    fn stop_and_collect_returns_none_when_already_inactive() {
        let profiler = Profiler::with_capacity(64);
        profiler.start();
        assert!(profiler.stop_and_collect().is_some());
        assert!(profiler.stop_and_collect().is_none());
    }
}
