/// Extension trait interpreting a `u32` modifier bitset.
///
/// Only the modifiers that influence ratings are modeled: clock-rate changes,
/// hit-window scaling, visibility reduction, assistance, and the mirrored
/// preprocessing path.
pub trait Mods: Copy {
    /// No-fail: assistance, reduces the performance multiplier.
    fn nf(self) -> bool;
    /// Easy: halves the difficulty sliders.
    fn ez(self) -> bool;
    /// Hidden: shortens object visibility.
    fn hd(self) -> bool;
    /// Hard rock: scales the difficulty sliders by 1.4.
    fn hr(self) -> bool;
    /// Double time: 1.5x clock rate.
    fn dt(self) -> bool;
    /// Relax: assistance, movement is automated.
    fn rx(self) -> bool;
    /// Half time: 0.75x clock rate.
    fn ht(self) -> bool;
    /// Mirror: reflects object positions during preprocessing.
    fn mr(self) -> bool;

    fn clock_rate(self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    fn difficulty_multiplier(self) -> f64 {
        if self.hr() {
            1.4
        } else if self.ez() {
            0.5
        } else {
            1.0
        }
    }
}

macro_rules! impl_mods_fn {
    ( $fn_name:ident, $bits:expr ) => {
        fn $fn_name(self) -> bool {
            self & ($bits) != 0
        }
    };
}

impl Mods for u32 {
    impl_mods_fn!(nf, 1 << 0);
    impl_mods_fn!(ez, 1 << 1);
    impl_mods_fn!(hd, 1 << 3);
    impl_mods_fn!(hr, 1 << 4);
    impl_mods_fn!(dt, 1 << 6);
    impl_mods_fn!(rx, 1 << 7);
    impl_mods_fn!(ht, 1 << 8);
    impl_mods_fn!(mr, 1 << 30);
}
