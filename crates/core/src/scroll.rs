/// Horizontal text scroller for long labels.
///
/// Text that fits in `width` characters passes through untouched.  Longer
/// text is windowed; every [`Scroller::apply`] call shows the current window
/// and then moves it by `speed` characters.  With `bounce` the window
/// reverses at either end, otherwise it wraps back to the start.
#[derive(Debug, Clone)]
pub struct Scroller {
    width:     usize,
    speed:     usize,
    bounce:    bool,
    start:     usize,
    backwards: bool,
    /// Text seen on the previous render; a change restarts the window.
    last:      String,
}

impl Scroller {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            speed: 1,
            bounce: true,
            start: 0,
            backwards: false,
            last: String::new(),
        }
    }

    pub fn with_speed(mut self, speed: usize) -> Self {
        self.speed = speed.max(1);
        self
    }

    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    /// Return the visible slice of `text` and advance one step.
    pub fn apply(&mut self, text: &str) -> String {
        if text != self.last {
            self.last = text.to_string();
            self.start = 0;
            self.backwards = false;
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.width {
            return text.to_string();
        }

        let max_start = chars.len() - self.width;
        let start = self.start.min(max_start);
        let visible: String = chars[start..start + self.width].iter().collect();

        self.start = self.next_start(start, max_start);
        visible
    }

    fn next_start(&mut self, start: usize, max_start: usize) -> usize {
        if self.backwards {
            if start > self.speed {
                return start - self.speed;
            }
            self.backwards = false;
            return 0;
        }

        let next = start + self.speed;
        if next <= max_start {
            return next;
        }
        // The tail is shown once before turning around.
        if start < max_start {
            return max_start;
        }
        if self.bounce && max_start > self.speed {
            self.backwards = true;
            max_start - self.speed
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        let mut s = Scroller::new(10);
        assert_eq!(s.apply("short"), "short");
        assert_eq!(s.apply("short"), "short");
    }

    #[test]
    fn long_text_bounces_between_ends() {
        let mut s = Scroller::new(3);
        let frames: Vec<String> = (0..6).map(|_| s.apply("abcde")).collect();
        assert_eq!(frames, vec!["abc", "bcd", "cde", "bcd", "abc", "bcd"]);
    }

    #[test]
    fn long_text_wraps_without_bounce() {
        let mut s = Scroller::new(3).with_bounce(false);
        let frames: Vec<String> = (0..4).map(|_| s.apply("abcd")).collect();
        assert_eq!(frames, vec!["abc", "bcd", "abc", "bcd"]);
    }

    #[test]
    fn fast_scroll_reaches_the_tail() {
        let mut s = Scroller::new(3).with_speed(3);
        let frames: Vec<String> = (0..6).map(|_| s.apply("abcdefg")).collect();
        assert_eq!(frames, vec!["abc", "def", "efg", "bcd", "abc", "def"]);

        let mut s = Scroller::new(3).with_speed(3).with_bounce(false);
        let frames: Vec<String> = (0..4).map(|_| s.apply("abcdefg")).collect();
        assert_eq!(frames, vec!["abc", "def", "efg", "abc"]);
    }

    #[test]
    fn new_text_restarts_window() {
        let mut s = Scroller::new(2);
        s.apply("wxyz");
        s.apply("wxyz");
        assert_eq!(s.apply("abcd"), "ab");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut s = Scroller::new(2);
        assert_eq!(s.apply("▶ab"), "▶a");
    }
}
