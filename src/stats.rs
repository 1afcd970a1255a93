use lifeduel::{Player, TickReport};
use std::time::Instant;

pub trait Recorder {
    type Str: AsRef<str>;

    fn record(&mut self, report: &TickReport, players: &[Player]);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

pub struct SimpleRecord {
    ticks: u64,
    alive: usize,
    deaths: usize,
    ticks_in_report: usize,
    last_report: Instant,
}
impl SimpleRecord {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            alive: 0,
            deaths: 0,
            ticks_in_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for SimpleRecord {
    type Str = String;

    fn record(&mut self, report: &TickReport, _players: &[Player]) {
        self.ticks = report.tick;
        self.ticks_in_report += 1;
        self.alive = report.alive;
        self.deaths = report.deaths;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed().as_millis() >= 500
    }
    fn report(&mut self) -> Self::Str {
        let ticks_per_sec = self.ticks_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.ticks_in_report = 0;

        format!(
            "{:.02}tick/s tick:{}, alive:{}, died:{}",
            ticks_per_sec, self.ticks, self.alive, self.deaths
        )
    }
}

struct CsvRow {
    tick: u64,
    delta_us: u128,
    alive: usize,
    deaths: usize,
    scores: [Option<i32>; 2],
}

pub struct CsvRecord {
    inner: SimpleRecord,
    rows: Vec<CsvRow>,
    last: Instant,
}
impl CsvRecord {
    pub fn new() -> Self {
        Self {
            inner: SimpleRecord::new(),
            rows: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        use std::{
            fs,
            io::{self, Write},
        };

        let file = fs::File::create(path)?;
        let mut file = io::BufWriter::new(file);
        self.write_to(&mut file)?;
        file.flush()
    }

    fn write_to<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(b"tick,delta_us,alive,died,score1,score2\n")?;
        for row in &self.rows {
            let [s1, s2] = row.scores.map(|s| s.map(|s| s.to_string()).unwrap_or_default());
            writeln!(
                out,
                "{},{},{},{},{},{}",
                row.tick, row.delta_us, row.alive, row.deaths, s1, s2
            )?;
        }
        Ok(())
    }
}
impl Recorder for CsvRecord {
    type Str = <SimpleRecord as Recorder>::Str;

    fn record(&mut self, report: &TickReport, players: &[Player]) {
        let delta_us = self.last.elapsed().as_micros();
        self.last = Instant::now();

        let mut scores = [None; 2];
        for player in players {
            scores[player.id.index()] = Some(player.score);
        }
        self.rows.push(CsvRow {
            tick: report.tick,
            delta_us,
            alive: report.alive,
            deaths: report.deaths,
            scores,
        });
        self.inner.record(report, players);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> Self::Str {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new())
        } else {
            Self::Simple(SimpleRecord::new())
        }
    }
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Err(std::io::Error::other(
                "statistics were not recorded, run with --stats",
            )),
        }
    }
}
impl Recorder for SwitchRecorder {
    type Str = String;

    fn record(&mut self, report: &TickReport, players: &[Player]) {
        match self {
            Self::Csv(r) => r.record(report, players),
            Self::Simple(r) => r.record(report, players),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> Self::Str {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeduel::{PlayerId, Pos2, Signals, Status};

    fn report(tick: u64) -> TickReport {
        TickReport {
            tick,
            status: Status::Running,
            signals: Signals::default(),
            alive: 12,
            deaths: 3,
        }
    }

    #[test]
    fn csv_has_a_row_per_tick() {
        let mut record = CsvRecord::new();
        let mut player = Player::new(PlayerId::One, Pos2::new(3, 3), 3);
        player.score = 4;
        record.record(&report(1), &[player]);
        record.record(&report(2), &[player]);

        let mut out = Vec::new();
        record.write_to(&mut out).expect("write to vec");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "tick,delta_us,alive,died,score1,score2");
        assert!(lines[2].starts_with("2,"));
        assert!(lines[2].ends_with(",12,3,4,"));
    }

    #[test]
    fn simple_report_mentions_counts() {
        let mut record = SimpleRecord::new();
        record.record(&report(7), &[]);

        let text = record.report();
        assert!(text.contains("tick:7"));
        assert!(text.contains("alive:12"));
    }

    #[test]
    fn simple_recorder_cannot_save() {
        let recorder = SwitchRecorder::new(false);

        assert!(recorder.save(std::env::temp_dir().join("never-written.csv")).is_err());
    }
}
