//! Pattern: Adapter
//! Example: a legacy rectangle behind the `Area` interface, and an MP3-only player
//! behind the newer multi-format `MediaPlayer` interface

use std::f64::consts::PI;

// ============================================
// 1. Shapes
// ============================================

pub trait Area {
    fn name(&self) -> &'static str;
    fn area(&self) -> f64;
}

/// Predates `Area` and cannot be changed.
#[derive(Debug, Clone)]
pub struct LegacyRectangle {
    pub width: f64,
    pub height: f64,
}

impl LegacyRectangle {
    pub fn calculate_area(&self) -> f64 {
        self.width * self.height
    }
}

pub struct RectangleAdapter {
    rectangle: LegacyRectangle,
}

impl RectangleAdapter {
    pub fn new(rectangle: LegacyRectangle) -> Self {
        Self { rectangle }
    }
}

impl Area for RectangleAdapter {
    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn area(&self) -> f64 {
        self.rectangle.calculate_area()
    }
}

pub struct Circle {
    pub radius: f64,
}

impl Area for Circle {
    fn name(&self) -> &'static str {
        "Circle"
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

pub fn show_area(shape: &dyn Area) -> String {
    format!("{} area: {:.2}", shape.name(), shape.area())
}

// ============================================
// 2. Media players
// ============================================

pub trait Mp3Player {
    fn play_song(&self, song: &str) -> String;
}

pub trait MediaPlayer {
    fn play_mp4(&self, song: &str) -> String;
    fn play_vlc(&self, song: &str) -> String;
}

pub struct LegacyMp3Player;

impl Mp3Player for LegacyMp3Player {
    fn play_song(&self, song: &str) -> String {
        format!("Playing MP3 song: {song}")
    }
}

pub struct ModernPlayer;

impl MediaPlayer for ModernPlayer {
    fn play_mp4(&self, song: &str) -> String {
        format!("Playing MP4 song: {song}")
    }

    fn play_vlc(&self, song: &str) -> String {
        format!("Playing VLC song: {song}")
    }
}

/// Routes every format to the wrapped MP3 player.
pub struct Mp3Adapter<P: Mp3Player> {
    player: P,
}

impl<P: Mp3Player> Mp3Adapter<P> {
    pub fn new(player: P) -> Self {
        Self { player }
    }
}

impl<P: Mp3Player> MediaPlayer for Mp3Adapter<P> {
    fn play_mp4(&self, song: &str) -> String {
        self.player.play_song(song)
    }

    fn play_vlc(&self, song: &str) -> String {
        self.player.play_song(song)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapted_rectangle_reports_area() {
        let adapter = RectangleAdapter::new(LegacyRectangle {
            width: 10.0,
            height: 5.0,
        });
        assert_eq!(adapter.area(), 50.0);
        assert_eq!(show_area(&adapter), "Rectangle area: 50.00");
    }

    #[test]
    fn test_heterogeneous_shapes() {
        let shapes: Vec<Box<dyn Area>> = vec![
            Box::new(RectangleAdapter::new(LegacyRectangle {
                width: 2.0,
                height: 3.0,
            })),
            Box::new(Circle { radius: 1.0 }),
        ];
        let report: Vec<String> = shapes.iter().map(|s| show_area(s.as_ref())).collect();
        assert_eq!(report, vec!["Rectangle area: 6.00", "Circle area: 3.14"]);
    }

    #[test]
    fn test_mp3_adapter_plays_new_formats() {
        let players: Vec<Box<dyn MediaPlayer>> = vec![
            Box::new(ModernPlayer),
            Box::new(Mp3Adapter::new(LegacyMp3Player)),
        ];
        assert_eq!(players[0].play_vlc("x"), "Playing VLC song: x");
        assert_eq!(players[1].play_mp4("x"), "Playing MP3 song: x");
        assert_eq!(players[1].play_vlc("x"), "Playing MP3 song: x");
    }
}
