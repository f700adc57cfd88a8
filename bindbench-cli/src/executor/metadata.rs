//! System Metadata Collection
//!
//! Describes the host a variant was measured on, stored with every
//! `VariantResults` so two result files from different machines can be told
//! apart.
//!
//! ## Collected Data
//!
//! - **OS**: Operating system name and kernel release
//! - **Architecture**: Target architecture of the running binary
//! - **Processor**: Model string from `/proc/cpuinfo` (x86 and ARM layouts)
//! - **CPU count**: Cores available to this process
//! - **Memory**: Total RAM from `/proc/meminfo`
//!
//! Off Linux only the OS, architecture and CPU count are filled in.

use bindbench_report::SystemInfo;

const UNKNOWN: &str = "Unknown";

/// Describe the machine the suite runs on
pub fn collect_system_info() -> SystemInfo {
    let cpuinfo = read_proc("/proc/cpuinfo");
    let meminfo = read_proc("/proc/meminfo");

    SystemInfo {
        os: std::env::consts::OS.to_string(),
        os_version: read_proc("/proc/sys/kernel/osrelease")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        arch: std::env::consts::ARCH.to_string(),
        cpu: cpuinfo
            .as_deref()
            .and_then(processor_name)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        cpu_cores: std::thread::available_parallelism().map_or(1, |n| n.get() as u32),
        memory_gb: meminfo.as_deref().and_then(total_memory_gb).unwrap_or(0.0),
    }
}

#[cfg(target_os = "linux")]
fn read_proc(path: &str) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

#[cfg(not(target_os = "linux"))]
fn read_proc(_path: &str) -> Option<String> {
    None
}

/// Value of the first `key : value` line whose key is in `keys`
fn proc_value<'a>(content: &'a str, keys: &[&str]) -> Option<&'a str> {
    content.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let value = value.trim();
        (keys.contains(&key.trim()) && !value.is_empty()).then_some(value)
    })
}

/// Processor model; x86 reports `model name`, ARM kernels `Hardware` or `Model`
fn processor_name(cpuinfo: &str) -> Option<String> {
    proc_value(cpuinfo, &["model name"])
        .or_else(|| proc_value(cpuinfo, &["Hardware", "Model"]))
        .map(str::to_string)
}

/// `MemTotal` (in kB) converted to GB
fn total_memory_gb(meminfo: &str) -> Option<f64> {
    let kb: u64 = proc_value(meminfo, &["MemTotal"])?
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;
    Some(kb as f64 / (1024.0 * 1024.0))
}
