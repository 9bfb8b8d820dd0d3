// Linux-specific helpers: /sys/class/power_supply, DMI, device tree.

use std::path::{Path, PathBuf};

/// Read a sysfs attribute and trim trailing newlines / NULs. `None` when missing or empty.
pub(super) fn read_trimmed(path: &Path) -> Option<String> {
    let v = std::fs::read_to_string(path).ok()?;
    let v = v.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if v.is_empty() {
        return None;
    }
    Some(v.to_string())
}

/// Product name from DMI (x86 laptops).
pub(super) fn read_product_name_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        read_trimmed(Path::new("/sys/class/dmi/id/product_name"))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Board model from the device tree (ARM phones and SBCs).
pub(super) fn read_device_tree_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        read_trimmed(Path::new("/proc/device-tree/model"))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Read system vendor from DMI (Linux).
pub(super) fn read_sys_vendor_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        read_trimmed(Path::new("/sys/class/dmi/id/sys_vendor"))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// First supply under `root` (sorted by name, so BAT0 wins over BAT1) whose `type` is Battery.
pub(super) fn find_battery_dir(root: &Path) -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(root)
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    dirs.sort();
    dirs.into_iter().find(|p| {
        read_trimmed(&p.join("type")).is_some_and(|t| t.eq_ignore_ascii_case("Battery"))
    })
}

/// Kernel `health` strings to OS health codes (1 Unknown .. 7 Cold).
pub(super) fn health_code_from_sysfs(s: &str) -> i32 {
    match s.trim().to_ascii_lowercase().as_str() {
        "good" => 2,
        "overheat" | "warm" | "hot" => 3,
        "dead" => 4,
        "over voltage" => 5,
        "unspecified failure" => 6,
        "cold" | "cool" => 7,
        _ => 1,
    }
}
