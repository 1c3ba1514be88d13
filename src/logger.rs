// In-app logger: keeps a bounded buffer of records for the Logs window,
// optionally mirrors them to stderr, and appends warn+ lines to log.txt.

use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::backtrace::Backtrace;
use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub msg: String,
}

impl LogEntry {
    pub fn format_line(&self) -> String {
        format!("[{:>5}] {}: {}", self.level, self.target, self.msg)
    }
}

const MAX_LOG_LINES: usize = 5000;
const LOG_FILE_NAME: &str = "log.txt";

/// Ring buffer of the most recent records.
struct LogBuffer {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl LogBuffer {
    fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
        }
    }

    fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }
}

lazy_static! {
    static ref LOGS: Mutex<LogBuffer> = Mutex::new(LogBuffer::new(MAX_LOG_LINES));
    static ref MIRROR_STDERR: bool = {
        let v = std::env::var("GUI_LOG_STDERR").unwrap_or_default();
        is_truthy(&v)
    };
    static ref LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);
}

static NEW_LOGS: AtomicBool = AtomicBool::new(false);

struct GuiLogger;

impl Log for GuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:>5}] {}: {}",
            timestamp_millis(),
            record.level(),
            record.target(),
            record.args()
        );

        if *MIRROR_STDERR {
            eprintln!("{}", line);
        }

        if matches!(record.level(), Level::Warn | Level::Error) {
            write_file_line(&line);
        }

        push_entry(LogEntry {
            level: record.level(),
            target: record.target().to_string(),
            msg: record.args().to_string(),
        });
    }

    fn flush(&self) {
        if let Ok(mut lf) = LOG_FILE.lock() {
            if let Some(f) = lf.as_mut() {
                let _ = f.flush();
            }
        }
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn push_entry(entry: LogEntry) {
    if let Ok(mut buf) = LOGS.lock() {
        buf.push(entry);
    }
    NEW_LOGS.store(true, Ordering::Relaxed);
}

/// Parse a RUST_LOG-style value. Only the global level is honoured;
/// `frame_picker=debug` style directives fall back to their level part.
fn parse_level(val: &str) -> Option<LevelFilter> {
    let v = val.trim();
    if let Ok(level) = v.parse::<LevelFilter>() {
        return Some(level);
    }
    v.split(',')
        .filter_map(|part| part.rsplit('=').next())
        .find_map(|lvl| lvl.trim().parse::<LevelFilter>().ok())
}

/// Install the logger, open log.txt and hook panics into the log.
pub fn init() {
    let _ = log::set_boxed_logger(Box::new(GuiLogger));

    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Debug);
    log::set_max_level(level);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE_NAME)
        .ok();
    if let Ok(mut lf) = LOG_FILE.lock() {
        *lf = file;
    }

    install_panic_hook();

    log::info!("GUI logger initialized at level {level} (warn+ persisted to {LOG_FILE_NAME})");
}

pub fn for_each_range<F: FnMut(&LogEntry)>(start: usize, end: usize, mut f: F) {
    if let Ok(buf) = LOGS.lock() {
        let len = buf.entries.len();
        let s = start.min(len);
        let e = end.min(len);
        buf.entries.range(s..e).for_each(|entry| f(entry));
    }
}

/// All buffered lines, for copying to the clipboard.
pub fn get_all() -> Vec<String> {
    LOGS.lock()
        .map(|buf| buf.entries.iter().map(LogEntry::format_line).collect())
        .unwrap_or_default()
}

pub fn len() -> usize {
    LOGS.lock().map(|buf| buf.entries.len()).unwrap_or(0)
}

pub fn clear() {
    if let Ok(mut buf) = LOGS.lock() {
        buf.entries.clear();
    }
    NEW_LOGS.store(true, Ordering::Relaxed);
}

/// Returns true if new logs arrived since the last call.
pub fn take_new_flag() -> bool {
    NEW_LOGS.swap(false, Ordering::Relaxed)
}

fn timestamp_millis() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

fn write_file_line(line: &str) {
    if let Ok(mut lf) = LOG_FILE.lock() {
        if let Some(f) = lf.as_mut() {
            let _ = writeln!(f, "{}", line);
            let _ = f.flush();
        }
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Box<Any>"
        };

        let loc = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let bt = Backtrace::force_capture();
        write_file_line(&format!(
            "[{}] [ERROR] panic at {loc}: {msg}",
            timestamp_millis()
        ));
        for line in format!("{bt:?}").lines() {
            write_file_line(line);
        }

        log::error!("panic at {loc}: {msg}\n{bt:?}");
    }));
}
