use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::app::App;
use crate::system::error::SampleResult;
use crate::system::platform::MetricSource;
use crate::system::snapshot::{
    CpuSnapshot, LoadAverages, MemoryStatus, TaskStates, TaskSummary, TickReport,
};
use crate::ui::{draw, header, plain, statusbar};

const MIB: u64 = 1024 * 1024;

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_report() -> TickReport {
    TickReport {
        cpu_usage_percent: 25.0,
        memory: MemoryStatus::new(8_192 * MIB, 2_048 * MIB),
        tasks: TaskSummary::new(
            120,
            Some(TaskStates {
                running: 1,
                sleeping: 118,
                stopped: 1,
                zombie: 0,
            }),
        ),
        load: LoadAverages::new(1.25, 0.75, 0.5),
        uptime_seconds: 3_725,
    }
}

/// Always reports a quarter-busy CPU step of 100 ticks.
struct SteadySource {
    ticks: std::cell::Cell<u64>,
}

impl MetricSource for SteadySource {
    fn name(&self) -> &'static str {
        "steady"
    }

    fn sample_cpu(&self) -> SampleResult<CpuSnapshot> {
        let step = self.ticks.get() + 1;
        self.ticks.set(step);
        Ok(CpuSnapshot::new(step * 75, step * 100))
    }

    fn sample_memory(&self) -> MemoryStatus {
        MemoryStatus::new(4_096 * MIB, 1_024 * MIB)
    }

    fn sample_tasks(&self) -> TaskSummary {
        TaskSummary::new(3, None)
    }

    fn sample_load_averages(&self) -> LoadAverages {
        LoadAverages::unavailable()
    }

    fn uptime_seconds(&self) -> u64 {
        30
    }
}

#[test]
fn header_shows_summary_rows() {
    let report = make_report();
    let output = render_to_string(90, 4, |frame| {
        header::render(frame, Rect::new(0, 0, 90, 4), Some(&report), "12:00:00");
    });
    let rows: Vec<&str> = output.lines().map(str::trim_end).collect();

    assert_eq!(
        rows[0],
        "top - 12:00:00 up 01:02,  load average: 1.25, 0.75, 0.50"
    );
    assert_eq!(
        rows[1],
        "Tasks: 120 total, 1 running, 118 sleeping, 1 stopped, 0 zombie"
    );
    assert_eq!(rows[2], "%Cpu(s): 25.0 us, 75.0 id");
    assert_eq!(rows[3], "MiB Mem : 8192.0 total, 6144.0 used, 2048.0 free");
}

#[test]
fn header_placeholder_before_first_tick() {
    let output = render_to_string(40, 4, |frame| {
        header::render(frame, Rect::new(0, 0, 40, 4), None, "12:00:00");
    });
    assert!(output.starts_with("Sampling..."));
    assert!(!output.contains("Tasks"));
}

#[test]
fn statusbar_lists_quit_keys_and_source() {
    let output = render_to_string(60, 1, |frame| {
        statusbar::render(frame, Rect::new(0, 0, 60, 1), "procfs");
    });
    assert!(output.contains(" q "));
    assert!(output.contains("Ctrl+C"));
    assert!(output.contains("source: procfs"));
}

#[test]
fn full_frame_after_a_tick() {
    let mut app = App::new(Box::new(SteadySource {
        ticks: std::cell::Cell::new(0),
    }))
    .unwrap();
    app.refresh().unwrap();

    let output = render_to_string(80, 8, |frame| draw(frame, &app));
    let rows: Vec<&str> = output.lines().collect();

    assert!(rows[0].starts_with("top - "));
    assert!(rows[0].contains("up 30s,  load average: N/A, N/A, N/A"));
    assert!(rows[1].starts_with("Tasks: 3 total, ? running"));
    assert!(rows[2].starts_with("%Cpu(s): 25.0 us, 75.0 id"));
    assert!(rows[3].starts_with("MiB Mem : 4096.0 total, 3072.0 used, 1024.0 free"));
    assert!(rows[7].contains("source: steady"));
}

#[test]
fn plain_render_clears_then_prints() {
    let mut out = Vec::new();
    plain::render(&mut out, &make_report(), "12:00:00").unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("\x1b[2J"));
    let body = &text[text.find("top - ").unwrap()..];
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2], "%Cpu(s): 25.0 us, 75.0 id");
}
