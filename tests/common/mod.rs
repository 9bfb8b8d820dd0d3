// Shared test helpers: scriptable power source and a recording renderer

#![allow(dead_code)]

use battmon::models::*;
use battmon::power_repo::PowerSource;
use battmon::render::Renderer;
use std::sync::{Arc, Mutex};

pub fn test_device() -> DeviceInfo {
    DeviceInfo {
        model: "Pixel 7".into(),
        manufacturer: "Google".into(),
        os_version: "Android 14".into(),
        kernel_version: "5.10.198-android13".into(),
    }
}

pub fn full_status() -> RawBatteryStatus {
    RawBatteryStatus {
        level: Some(85),
        scale: Some(100),
        temperature_tenths: Some(215),
        voltage_mv: Some(3850),
        health_code: Some(2),
    }
}

/// Power source whose readings the test can change between samples.
#[derive(Clone, Default)]
pub struct FakeSource {
    pub current_ua: Arc<Mutex<Option<i32>>>,
    pub status: Arc<Mutex<Option<RawBatteryStatus>>>,
}

impl FakeSource {
    pub fn new(current_ua: Option<i32>, status: Option<RawBatteryStatus>) -> Self {
        Self {
            current_ua: Arc::new(Mutex::new(current_ua)),
            status: Arc::new(Mutex::new(status)),
        }
    }

    pub fn set_current_ua(&self, ua: Option<i32>) {
        *self.current_ua.lock().unwrap() = ua;
    }
}

impl PowerSource for FakeSource {
    fn current_now_ua(&self) -> Option<i32> {
        *self.current_ua.lock().unwrap()
    }

    fn battery_status(&self) -> Option<RawBatteryStatus> {
        *self.status.lock().unwrap()
    }
}

/// Renderer that keeps every snapshot it was handed.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Arc<Mutex<Vec<BatterySnapshot>>>,
}

impl RecordingRenderer {
    pub fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &BatterySnapshot) {
        self.frames.lock().unwrap().push(snapshot.clone());
    }
}
