/// A high level motion request understood by [`crate::Robot::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    GoForward,
    GoBackwards,
    GoLeft,
    GoRight,
    StopMove,
    MoveAhead(i32),
    MoveSideways(i32),
    HeadUp,
    HeadDown,
    HeadLeft,
    HeadRight,
    HeadRollLeft,
    HeadRollRight,
    HeadStop,
}

/// Usage text for the keyboard bindings of [`Intent::from_key`].
pub const KEY_HELP: &str = "\
w = increment forward velocity
s = increment backward velocity
a = increment left steering
d = increment right steering
x = freeze

i = point head up
m = point head down
j = point head left
k = point head right
h = roll head left
l = roll head right
o = head motors off

u = usage
q = quit";

/// Key that ends a keyboard driving session.
pub const QUIT_KEY: char = 'q';

/// Key that prints [`KEY_HELP`].
pub const HELP_KEY: char = 'u';

impl Intent {
    pub fn from_key(key: char) -> Option<Intent> {
        let intent = match key {
            'w' => Intent::GoForward,
            's' => Intent::GoBackwards,
            'a' => Intent::GoLeft,
            'd' => Intent::GoRight,
            'x' => Intent::StopMove,
            'i' => Intent::HeadUp,
            'm' => Intent::HeadDown,
            'j' => Intent::HeadLeft,
            'k' => Intent::HeadRight,
            'h' => Intent::HeadRollLeft,
            'l' => Intent::HeadRollRight,
            'o' => Intent::HeadStop,
            _ => return None,
        };
        Some(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_keys() {
        assert_eq!(Intent::from_key('w'), Some(Intent::GoForward));
        assert_eq!(Intent::from_key('s'), Some(Intent::GoBackwards));
        assert_eq!(Intent::from_key('a'), Some(Intent::GoLeft));
        assert_eq!(Intent::from_key('d'), Some(Intent::GoRight));
        assert_eq!(Intent::from_key('x'), Some(Intent::StopMove));
    }

    #[test]
    fn head_keys() {
        assert_eq!(Intent::from_key('i'), Some(Intent::HeadUp));
        assert_eq!(Intent::from_key('m'), Some(Intent::HeadDown));
        assert_eq!(Intent::from_key('j'), Some(Intent::HeadLeft));
        assert_eq!(Intent::from_key('k'), Some(Intent::HeadRight));
        assert_eq!(Intent::from_key('h'), Some(Intent::HeadRollLeft));
        assert_eq!(Intent::from_key('l'), Some(Intent::HeadRollRight));
        assert_eq!(Intent::from_key('o'), Some(Intent::HeadStop));
    }

    #[test]
    fn control_keys_are_not_intents() {
        assert_eq!(Intent::from_key(QUIT_KEY), None);
        assert_eq!(Intent::from_key(HELP_KEY), None);
        assert_eq!(Intent::from_key('W'), None);
    }
}
