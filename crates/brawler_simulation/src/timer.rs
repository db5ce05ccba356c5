//! Кооперативный countdown таймер
//!
//! Заменяет engine Timer nodes (подключённые через string-named signals).
//! Таймер принадлежит контроллеру и тикается из той же FixedUpdate системы,
//! что и владеет переходом, который он запускает.
//!
//! Семантика (one-shot):
//! - `start(duration)` - (пере)запуск с полной длительностью
//! - `stop()` - отмена, будущих срабатываний нет
//! - `pause()` / `resume()` - заморозка оставшегося времени
//! - `tick(delta)` - возвращает `true` ровно один раз, когда время истекло

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TimerStatus {
    #[default]
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct CountdownTimer {
    /// Длительность последнего запуска (секунды)
    pub duration: f32,
    /// Оставшееся время (секунды)
    pub remaining: f32,
    pub status: TimerStatus,
}

impl CountdownTimer {
    pub fn start(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.remaining = self.duration;
        self.status = TimerStatus::Running;
    }

    pub fn stop(&mut self) {
        self.remaining = 0.0;
        self.status = TimerStatus::Stopped;
    }

    /// Пауза работает только для запущенного таймера.
    pub fn pause(&mut self) {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == TimerStatus::Paused {
            self.status = TimerStatus::Running;
        }
    }

    /// Paused таймер тоже считается "не остановленным".
    pub fn is_stopped(&self) -> bool {
        self.status == TimerStatus::Stopped
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    pub fn time_left(&self) -> f32 {
        if self.is_stopped() {
            0.0
        } else {
            self.remaining
        }
    }

    /// Продвигает таймер на `delta`. `true` = сработал в этом тике.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }

        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.status = TimerStatus::Stopped;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let mut timer = CountdownTimer::default();
        timer.start(0.5);

        assert!(!timer.tick(0.25));
        assert!(timer.tick(0.25));
        assert!(timer.is_stopped());
        assert!(!timer.tick(0.25)); // повторно не срабатывает
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = CountdownTimer::default();
        assert!(!timer.tick(10.0));

        timer.start(1.0);
        timer.stop();
        assert!(!timer.tick(10.0));
    }

    #[test]
    fn test_pause_keeps_remaining_time() {
        let mut timer = CountdownTimer::default();
        timer.start(1.0);
        timer.tick(0.4);

        timer.pause();
        assert!(!timer.is_stopped());
        assert!(!timer.tick(5.0));
        assert!((timer.time_left() - 0.6).abs() < 1e-5);

        timer.resume();
        assert!(!timer.tick(0.5));
        assert!(timer.tick(0.2));
    }

    #[test]
    fn test_restart_resets_to_full_duration() {
        let mut timer = CountdownTimer::default();
        timer.start(0.5);
        timer.tick(0.4);

        timer.start(0.5);
        assert!(!timer.tick(0.4));
        assert!(timer.tick(0.2));
    }

    #[test]
    fn test_pause_on_stopped_timer_is_noop() {
        let mut timer = CountdownTimer::default();
        timer.pause();
        assert!(timer.is_stopped());
    }
}
