//! Barcode scanner detection.
//!
//! USB scanners act as keyboards and "type" the code much faster than a
//! person, finishing with Enter. Keystrokes arriving closer together than
//! `max_key_interval_ms` accumulate; a slower gap starts a fresh buffer.
//! Enter emits the buffer when it holds at least `min_length` characters.

use leptos::ev;
use leptos::prelude::*;

use super::config::config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Ввод продолжается или это не сканер
    Pending,
    Scanned(String),
}

#[derive(Debug, Clone)]
pub struct ScannerBuffer {
    buffer: String,
    last_key_at: Option<f64>,
    max_interval_ms: f64,
    min_length: usize,
}

impl ScannerBuffer {
    pub fn new(max_interval_ms: f64, min_length: usize) -> Self {
        Self {
            buffer: String::new(),
            last_key_at: None,
            max_interval_ms,
            min_length,
        }
    }

    /// `key`: значение `KeyboardEvent.key`, `at_ms`: метка времени нажатия
    pub fn push(&mut self, key: &str, at_ms: f64) -> ScanOutcome {
        // Скорость проверяется между символами; сам Enter может прийти позже
        if key == "Enter" {
            let code = std::mem::take(&mut self.buffer);
            self.last_key_at = None;

            return if code.chars().count() >= self.min_length {
                ScanOutcome::Scanned(code)
            } else {
                ScanOutcome::Pending
            };
        }

        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            // Shift, Tab, стрелки и т.п.
            return ScanOutcome::Pending;
        };
        if c.is_control() {
            return ScanOutcome::Pending;
        }

        if let Some(last) = self.last_key_at {
            if at_ms - last > self.max_interval_ms {
                self.buffer.clear();
            }
        }
        self.buffer.push(c);
        self.last_key_at = Some(at_ms);
        ScanOutcome::Pending
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_key_at = None;
    }
}

/// Глобальный слушатель `keydown` для сканера.
///
/// Вкладки остаются смонтированными, поэтому `enabled` должен быть true
/// только для активной вкладки.
pub fn use_barcode_scanner(enabled: Signal<bool>, on_scan: Callback<String>) {
    let cfg = &config().scanner;
    let buffer = StoredValue::new(ScannerBuffer::new(
        cfg.max_key_interval_ms as f64,
        cfg.min_length,
    ));

    let handle = window_event_listener(ev::keydown, move |event| {
        if !enabled.get_untracked() {
            buffer.update_value(ScannerBuffer::reset);
            return;
        }
        let now = js_sys::Date::now();
        let outcome = buffer
            .try_update_value(|b| b.push(&event.key(), now))
            .unwrap_or(ScanOutcome::Pending);
        if let ScanOutcome::Scanned(code) = outcome {
            event.prevent_default();
            log::info!("barcode scanned: {}", code);
            on_scan.run(code);
        }
    });

    on_cleanup(move || handle.remove());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(buffer: &mut ScannerBuffer, text: &str, start: f64, step: f64) -> f64 {
        let mut t = start;
        for c in text.chars() {
            assert_eq!(buffer.push(&c.to_string(), t), ScanOutcome::Pending);
            t += step;
        }
        t
    }

    #[test]
    fn test_fast_burst_is_scan() {
        let mut b = ScannerBuffer::new(50.0, 6);
        let t = feed(&mut b, "7790040123456", 1000.0, 10.0);
        assert_eq!(
            b.push("Enter", t),
            ScanOutcome::Scanned("7790040123456".to_string())
        );
    }

    #[test]
    fn test_human_typing_is_not_scan() {
        let mut b = ScannerBuffer::new(50.0, 6);
        let t = feed(&mut b, "yerba mate", 1000.0, 180.0);
        assert_eq!(b.push("Enter", t), ScanOutcome::Pending);
    }

    #[test]
    fn test_short_code_is_discarded() {
        let mut b = ScannerBuffer::new(50.0, 6);
        let t = feed(&mut b, "123", 0.0, 5.0);
        assert_eq!(b.push("Enter", t), ScanOutcome::Pending);
        // буфер очищен после Enter
        let t = feed(&mut b, "123456", t + 1000.0, 5.0);
        assert_eq!(b.push("Enter", t), ScanOutcome::Scanned("123456".into()));
    }

    #[test]
    fn test_slow_gap_restarts_buffer() {
        let mut b = ScannerBuffer::new(50.0, 6);
        // человек набрал "ab", потом сканер выдал код
        feed(&mut b, "ab", 0.0, 200.0);
        let t = feed(&mut b, "12345678", 2000.0, 8.0);
        assert_eq!(b.push("Enter", t), ScanOutcome::Scanned("12345678".into()));
    }

    #[test]
    fn test_late_enter_still_emits_burst() {
        let mut b = ScannerBuffer::new(50.0, 6);
        let t = feed(&mut b, "12345678", 0.0, 8.0);
        assert_eq!(b.push("Enter", t + 500.0), ScanOutcome::Scanned("12345678".into()));
        // следующий Enter без символов ничего не выдаёт
        assert_eq!(b.push("Enter", t + 600.0), ScanOutcome::Pending);
    }

    #[test]
    fn test_modifier_keys_ignored() {
        let mut b = ScannerBuffer::new(50.0, 6);
        let mut t = 0.0;
        for key in ["A", "Shift", "B", "C", "Shift", "D", "E", "F"] {
            b.push(key, t);
            t += 5.0;
        }
        assert_eq!(b.push("Enter", t), ScanOutcome::Scanned("ABCDEF".into()));
    }

    #[test]
    fn test_lone_enter() {
        let mut b = ScannerBuffer::new(50.0, 6);
        assert_eq!(b.push("Enter", 0.0), ScanOutcome::Pending);
    }
}
