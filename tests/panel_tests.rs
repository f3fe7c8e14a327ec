// Panel builder tests: gauges, process ranking, placeholders, determinism

mod common;

use common::{process, synthetic_snapshot};
use sysdash::config::AppConfig;
use sysdash::models::Reading;
use sysdash::panel::*;

fn builder() -> PanelBuilder {
    PanelBuilder::from_config(&AppConfig::default())
}

fn gauge_rows(panel: &Panel) -> &[GaugeRow] {
    match &panel.kind {
        PanelKind::Gauges(rows) => rows,
        other => panic!("expected gauges, got {:?}", other),
    }
}

fn text_lines(panel: &Panel) -> &[TextLine] {
    match &panel.kind {
        PanelKind::Text(text) => &text.lines,
        other => panic!("expected text, got {:?}", other),
    }
}

fn table(panel: &Panel) -> &TableContent {
    match &panel.kind {
        PanelKind::Table(table) => table,
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn test_build_all_yields_one_panel_per_slot_in_order() {
    let panels = builder().build_all(&synthetic_snapshot());
    let slots: Vec<PanelSlot> = panels.iter().map(|p| p.slot).collect();
    assert_eq!(slots, PanelSlot::ALL.to_vec());
}

#[test]
fn test_resource_gauges_quantize_percentages() {
    let builder = builder();
    let panel = builder.resources_panel(&synthetic_snapshot());
    let rows = gauge_rows(&panel);
    let width = builder.bar_width;

    let cpu = rows[0].value.expect("cpu gauge");
    assert_eq!(rows[0].label, "CPU");
    assert_eq!(cpu.filled, (0.42 * width as f64).round() as usize);
    assert_eq!(cpu.band, Band::Normal);

    let memory = rows[1].value.expect("memory gauge");
    assert_eq!(memory.filled, (0.77 * width as f64).round() as usize);
    assert_eq!(memory.band, Band::Warning);

    let disk = rows[2].value.expect("disk gauge");
    assert_eq!(disk.filled, (0.10 * width as f64).round() as usize);
    assert_eq!(disk.width, width);
}

#[test]
fn test_gauge_value_endpoints_and_bands() {
    let builder = builder();
    let empty = builder.gauge_value(0.0);
    assert_eq!(empty.filled, 0);
    assert_eq!(empty.band, Band::Normal);
    let full = builder.gauge_value(100.0);
    assert_eq!(full.filled, builder.bar_width);
    assert_eq!(full.band, Band::Critical);
    let over = builder.gauge_value(250.0);
    assert_eq!(over.pct, 100.0);
    assert_eq!(over.filled, builder.bar_width);
}

#[test]
fn test_thresholds_come_from_config() {
    let config = AppConfig::load_from_str("[thresholds]\nwarn_pct = 30.0\ncritical_pct = 50.0\n")
        .unwrap();
    let builder = PanelBuilder::from_config(&config);
    assert_eq!(builder.gauge_value(42.0).band, Band::Warning);
    assert_eq!(builder.gauge_value(77.0).band, Band::Critical);
}

#[test]
fn test_cpu_cores_panel_has_one_row_per_core() {
    let panel = builder().cpu_cores_panel(&synthetic_snapshot());
    let rows = gauge_rows(&panel);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].label, "Core  0");
    assert_eq!(rows[3].label, "Core  3");
    assert_eq!(rows[3].value.unwrap().band, Band::Critical);
}

#[test]
fn test_processes_sorted_by_memory_then_pid() {
    let panel = builder().processes_panel(&synthetic_snapshot());
    let table = table(&panel);
    assert_eq!(table.header, vec!["PID", "Name", "CPU%", "MEM%"]);
    let pids: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
    // 20.0, 12.0, then the 5.0 tie broken by pid (7 before 300), then 0.5
    assert_eq!(pids, vec!["42", "88", "7", "300", "1200"]);
    assert_eq!(table.rows[0][3], "20.0");
    assert_eq!(table.rows[0][2], "12.5");
    assert!(table.placeholder.is_none());
}

#[test]
fn test_process_names_are_truncated() {
    let panel = builder().processes_panel(&synthetic_snapshot());
    let long = &table(&panel).rows[4][1];
    assert_eq!(long, "a-very-long-pr");
    assert_eq!(long.chars().count(), 14);
}

#[test]
fn test_wide_process_names_are_truncated_by_columns() {
    let mut snapshot = synthetic_snapshot();
    snapshot.top_processes = Reading::Available(vec![
        process(1, "数据库服务进程守护程序", 0.0, 2.0),
        process(2, "ab中文", 0.0, 1.0),
    ]);
    let panel = builder().processes_panel(&snapshot);
    let rows = &table(&panel).rows;
    // 14 columns hold seven two-column glyphs
    assert_eq!(rows[0][1], "数据库服务进程");
    assert_eq!(rows[1][1], "ab中文");
}

#[test]
fn test_process_table_truncated_to_max_rows() {
    let mut snapshot = synthetic_snapshot();
    snapshot.top_processes = Reading::Available(
        (0..30u32)
            .map(|pid| process(pid, "worker", 0.0, (pid % 7) as f64))
            .collect(),
    );
    let panel = builder().processes_panel(&snapshot);
    let rows = &table(&panel).rows;
    assert_eq!(rows.len(), 8);
    let mems: Vec<f64> = rows.iter().map(|r| r[3].parse().unwrap()).collect();
    assert!(mems.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_rank_processes_tie_break_and_nan() {
    let processes = vec![
        process(9, "b", 0.0, 3.0),
        process(2, "a", 0.0, 3.0),
        process(5, "nan", 0.0, f64::NAN),
        process(1, "top", 0.0, 9.0),
    ];
    let ranked: Vec<u32> = rank_processes(&processes, 10).iter().map(|p| p.pid).collect();
    assert_eq!(ranked, vec![1, 2, 9, 5]);
}

#[test]
fn test_rank_processes_treats_signed_zero_as_a_tie() {
    let processes = vec![process(2, "b", 0.0, 0.0), process(1, "a", 0.0, -0.0)];
    let pids: Vec<u32> = rank_processes(&processes, 10).iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![1, 2]);
}

#[test]
fn test_unavailable_network_renders_placeholder_only_there() {
    let mut snapshot = synthetic_snapshot();
    snapshot.network = Reading::unavailable("permission denied");
    let panels = builder().build_all(&snapshot);

    let network = panels.iter().find(|p| p.slot == PanelSlot::Network).unwrap();
    assert!(text_lines(network).iter().all(|l| l.value == PLACEHOLDER));

    let resources = panels.iter().find(|p| p.slot == PanelSlot::Resources).unwrap();
    assert!(gauge_rows(resources).iter().all(|r| r.value.is_some()));
    let processes = panels.iter().find(|p| p.slot == PanelSlot::Processes).unwrap();
    assert_eq!(table(processes).rows.len(), 5);
}

#[test]
fn test_unavailable_groups_keep_panel_shape() {
    let mut snapshot = synthetic_snapshot();
    snapshot.cpu = Reading::unavailable("read error");
    snapshot.memory = Reading::unavailable("read error");
    snapshot.top_processes = Reading::unavailable("access denied");
    let builder = builder();

    let resources = builder.resources_panel(&snapshot);
    let rows = gauge_rows(&resources);
    assert_eq!(rows.len(), 3);
    assert!(rows[0].value.is_none());
    assert!(rows[1].value.is_none());
    assert!(rows[2].value.is_some());

    let cores = builder.cpu_cores_panel(&snapshot);
    assert_eq!(gauge_rows(&cores).len(), 1);

    let processes = builder.processes_panel(&snapshot);
    assert_eq!(table(&processes).placeholder.as_deref(), Some(PLACEHOLDER));
    assert!(table(&processes).rows.is_empty());

    let all = builder.build_all(&snapshot);
    let system = all.iter().find(|p| p.slot == PanelSlot::SystemInfo).unwrap();
    let cores_line = text_lines(system)
        .iter()
        .find(|l| l.label.as_deref() == Some("CPU Cores"))
        .unwrap();
    assert_eq!(cores_line.value, PLACEHOLDER);
}

#[test]
fn test_system_info_and_header_text() {
    let panels = builder().build_all(&synthetic_snapshot());
    let header = text_lines(&panels[0]);
    assert!(header[0].value.ends_with("2026-10-19 12:30:00"));

    let system = text_lines(&panels[1]);
    let value = |label: &str| {
        system
            .iter()
            .find(|l| l.label.as_deref() == Some(label))
            .map(|l| l.value.clone())
            .unwrap()
    };
    assert_eq!(value("Hostname"), "testhost");
    assert_eq!(value("Uptime"), "2d 5h 7m");
    assert_eq!(value("Memory Total"), "16.0 GB");
    assert_eq!(value("Load Average"), "0.50, 0.75, 1.25");
    assert_eq!(value("CPU Cores"), "4");
}

#[test]
fn test_building_twice_is_identical() {
    let snapshot = synthetic_snapshot();
    let builder = builder();
    assert_eq!(builder.build_all(&snapshot), builder.build_all(&snapshot));
}
