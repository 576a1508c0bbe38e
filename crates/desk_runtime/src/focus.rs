//! Z-order assignment for windows and chrome layers.

/// Z-index of the frontmost non-maximized window; deeper ranks count down.
pub const WINDOW_STACK_BASE_Z: i32 = 40;

/// Z-index of the status strip and launcher.
pub const CHROME_LAYER_Z: i32 = 50;

/// Z-index of a maximized window, above the chrome so the hidden strips stay
/// out of its way until a reveal brings them back on top via stacking order
/// of later siblings.
pub const MAXIMIZED_WINDOW_Z: i32 = 60;

/// Computes the z-index for a window at the given stack rank.
///
/// Rank 0 is frontmost. The whole stack sits below the chrome layer; a
/// maximized window jumps above it.
pub fn z_index_for(rank: usize, maximized: bool) -> i32 {
    if maximized {
        return MAXIMIZED_WINDOW_Z;
    }
    WINDOW_STACK_BASE_Z.saturating_sub(rank as i32).max(1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ranks_descend_below_the_chrome_layer() {
        assert_eq!(z_index_for(0, false), 40);
        assert_eq!(z_index_for(1, false), 39);
        assert_eq!(z_index_for(4, false), 36);
        assert!(z_index_for(0, false) < CHROME_LAYER_Z);
    }

    #[test]
    fn maximized_windows_sit_above_the_chrome() {
        assert_eq!(z_index_for(3, true), MAXIMIZED_WINDOW_Z);
        assert!(z_index_for(3, true) > CHROME_LAYER_Z);
    }

    #[test]
    fn deep_stacks_never_reach_zero() {
        assert_eq!(z_index_for(1000, false), 1);
    }
}
