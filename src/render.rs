// Snapshot formatting and output renderers.
// Formatting is pure; renderers only write. Write failures are logged and dropped.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::models::{BatteryHealth, BatterySnapshot};

/// Display language for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn health_label(self, health: BatteryHealth) -> &'static str {
        match (self, health) {
            (Locale::En, BatteryHealth::Unknown) => "Unknown",
            (Locale::En, BatteryHealth::Good) => "Good",
            (Locale::En, BatteryHealth::Overheat) => "Overheat",
            (Locale::En, BatteryHealth::Dead) => "Dead",
            (Locale::En, BatteryHealth::OverVoltage) => "Over voltage",
            (Locale::En, BatteryHealth::Failure) => "Failure",
            (Locale::En, BatteryHealth::Cold) => "Cold",
            (Locale::Zh, BatteryHealth::Unknown) => "未知",
            (Locale::Zh, BatteryHealth::Good) => "良好",
            (Locale::Zh, BatteryHealth::Overheat) => "过热",
            (Locale::Zh, BatteryHealth::Dead) => "损坏",
            (Locale::Zh, BatteryHealth::OverVoltage) => "过压",
            (Locale::Zh, BatteryHealth::Failure) => "故障",
            (Locale::Zh, BatteryHealth::Cold) => "低温",
        }
    }

    fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN_LABELS,
            Locale::Zh => &ZH_LABELS,
        }
    }
}

struct Labels {
    current: &'static str,
    min: &'static str,
    max: &'static str,
    level: &'static str,
    health: &'static str,
    temperature: &'static str,
    voltage: &'static str,
    model: &'static str,
    manufacturer: &'static str,
    os_version: &'static str,
    kernel: &'static str,
}

const EN_LABELS: Labels = Labels {
    current: "Current",
    min: "Min",
    max: "Max",
    level: "Level",
    health: "Health",
    temperature: "Temperature",
    voltage: "Voltage",
    model: "Model",
    manufacturer: "Manufacturer",
    os_version: "OS version",
    kernel: "Kernel",
};

const ZH_LABELS: Labels = Labels {
    current: "当前电流",
    min: "最低",
    max: "最高",
    level: "电量",
    health: "健康度",
    temperature: "温度",
    voltage: "电压",
    model: "型号",
    manufacturer: "制造商",
    os_version: "系统版本",
    kernel: "内核版本",
};

/// Display strings for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    pub current: String,
    pub stats: String,
    pub level: String,
    pub health: String,
    pub temperature: String,
    pub voltage: String,
    pub model: String,
    pub manufacturer: String,
    pub os_version: String,
    pub kernel_version: String,
}

impl SnapshotView {
    pub fn new(snapshot: &BatterySnapshot, locale: Locale) -> Self {
        let labels = locale.labels();
        Self {
            current: format_current(snapshot),
            stats: format!(
                "{}: {} mA  {}: {} mA",
                labels.min, snapshot.min_current_ma, labels.max, snapshot.max_current_ma
            ),
            level: format!("{}%", snapshot.level_percent),
            health: locale.health_label(snapshot.health).to_string(),
            // Debug keeps the shortest round-trip form with at least one decimal (4.0, 3.85)
            temperature: format!("{:?}°C", snapshot.temperature_celsius),
            voltage: format!("{:?}V", snapshot.voltage_volts),
            model: snapshot.device.model.clone(),
            manufacturer: snapshot.device.manufacturer.clone(),
            os_version: snapshot.device.os_version.clone(),
            kernel_version: snapshot.device.kernel_version.clone(),
        }
    }
}

fn format_current(snapshot: &BatterySnapshot) -> String {
    if snapshot.is_charging() {
        format!("+{} mA", snapshot.current_now_ma)
    } else {
        format!("{} mA", snapshot.current_now_ma)
    }
}

/// The UI layer: receives one snapshot per tick.
pub trait Renderer {
    fn render(&mut self, snapshot: &BatterySnapshot);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, snapshot: &BatterySnapshot) {
        (**self).render(snapshot)
    }
}

/// Labelled text block per frame. With `clear_screen`, each frame repaints the terminal.
pub struct TextRenderer<W> {
    out: W,
    locale: Locale,
    clear_screen: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, locale: Locale, clear_screen: bool) -> Self {
        Self {
            out,
            locale,
            clear_screen,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, view: &SnapshotView) -> std::io::Result<()> {
        let l = self.locale.labels();
        if self.clear_screen {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        let rows = [
            (l.current, &view.current),
            ("", &view.stats),
            (l.level, &view.level),
            (l.health, &view.health),
            (l.temperature, &view.temperature),
            (l.voltage, &view.voltage),
            (l.model, &view.model),
            (l.manufacturer, &view.manufacturer),
            (l.os_version, &view.os_version),
            (l.kernel, &view.kernel_version),
        ];
        for (label, value) in rows {
            if label.is_empty() {
                writeln!(self.out, "{:<14}{}", "", value)?;
            } else {
                writeln!(self.out, "{:<14}{}", format!("{}:", label), value)?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, snapshot: &BatterySnapshot) {
        let view = SnapshotView::new(snapshot, self.locale);
        if let Err(e) = self.write_frame(&view) {
            tracing::warn!(error = %e, operation = "render_text", "frame write failed");
        }
    }
}

/// One JSON object per line: raw snapshot, display strings and a local timestamp.
pub struct JsonRenderer<W> {
    out: W,
    locale: Locale,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFrame<'a> {
    timestamp: String,
    /// Numeric OS health code (1 Unknown .. 7 Cold).
    health_code: i32,
    snapshot: &'a BatterySnapshot,
    display: SnapshotView,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, locale: Locale) -> Self {
        Self { out, locale }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, snapshot: &BatterySnapshot) -> anyhow::Result<()> {
        let frame = JsonFrame {
            timestamp: chrono::Local::now().to_rfc3339(),
            health_code: snapshot.health.code(),
            snapshot,
            display: SnapshotView::new(snapshot, self.locale),
        };
        serde_json::to_writer(&mut self.out, &frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, snapshot: &BatterySnapshot) {
        if let Err(e) = self.write_frame(snapshot) {
            tracing::warn!(error = %e, operation = "render_json", "frame write failed");
        }
    }
}
