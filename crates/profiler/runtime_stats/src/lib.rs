
use log::{info, warn};
use parking_lot::Mutex;
use std::{collections::HashMap, time::{Duration, Instant}};

static STATISTICS: Mutex<Option<Statistics>> = Mutex::new(None);

/// Starts collecting timings of profiled scopes.
pub fn init_statistics(session: &'static str) {
    let mut statistics = STATISTICS.lock();
    if statistics.is_some() {
        warn!("Statistics already initialized");
    } else {
        *statistics = Some(Statistics {
            session,
            started: Instant::now(),
            map: HashMap::new(),
        });
    }
}

/// Stops collecting and logs `limit` scopes with the largest total time.
pub fn finish_statistics(limit: usize) {
    let Some(statistics) = STATISTICS.lock().take() else {
        return;
    };
    info!(
        "Profiling session '{}' finished after {:.2?}",
        statistics.session,
        statistics.started.elapsed()
    );
    for (name, record) in statistics.slowest(limit) {
        info!(
            "{:>10.2?} total | {:>8} calls | avg {:>9.2?} | max {:>9.2?} | {}",
            record.total_time,
            record.count,
            record.average(),
            record.max_time,
            name,
        );
    }
}

pub struct Statistics {
    session: &'static str,
    started: Instant,
    map: HashMap<&'static str, StatisticRecord>,
}

impl Statistics {
    pub fn slowest(&self, limit: usize) -> Vec<(&'static str, StatisticRecord)> {
        let mut records: Vec<_> = self.map.iter()
            .map(|(name, record)| (*name, record.clone()))
            .collect();
        records.sort_by(|(_, a), (_, b)| b.total_time.cmp(&a.total_time));
        records.truncate(limit);
        records
    }
}

#[derive(Clone, Debug)]
pub struct StatisticRecord {
    pub count: u32,
    pub total_time: Duration,
    pub max_time: Duration,
    pub min_time: Duration,
}

impl StatisticRecord {
    pub fn new() -> Self {
        StatisticRecord {
            count: 0,
            total_time: Duration::ZERO,
            max_time: Duration::ZERO,
            min_time: Duration::MAX,
        }
    }

    pub fn add(&mut self, duration: Duration) {
        self.count += 1;
        self.total_time += duration;
        self.max_time = self.max_time.max(duration);
        self.min_time = self.min_time.min(duration);
    }

    pub fn average(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        self.total_time / self.count
    }
}

/// Guard created when a profiled scope is entered, on drop it records the time spent in the scope.
pub struct TimedScope {
    name: &'static str,
    start: Instant,
}

impl TimedScope {
    pub fn new(name: &'static str) -> Self {
        TimedScope {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for TimedScope {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let mut statistics = STATISTICS.lock();
        if let Some(current) = statistics.as_mut() {
            current.map.entry(self.name)
                .or_insert_with(StatisticRecord::new)
                .add(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tracks_extremes_and_average() {
        let mut record = StatisticRecord::new();
        assert_eq!(record.average(), Duration::ZERO);

        record.add(Duration::from_millis(2));
        record.add(Duration::from_millis(6));

        assert_eq!(record.count, 2);
        assert_eq!(record.min_time, Duration::from_millis(2));
        assert_eq!(record.max_time, Duration::from_millis(6));
        assert_eq!(record.average(), Duration::from_millis(4));
    }

    #[test]
    fn slowest_orders_by_total_time() {
        let mut statistics = Statistics {
            session: "test",
            started: Instant::now(),
            map: HashMap::new(),
        };
        for (name, millis) in [("fast", 1), ("slow", 9), ("medium", 4)] {
            let mut record = StatisticRecord::new();
            record.add(Duration::from_millis(millis));
            statistics.map.insert(name, record);
        }

        let names: Vec<_> = statistics.slowest(2).into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["slow", "medium"]);
    }
}
