//! Field layout of one meter frame.
//!
//! Fields are listed in wire order. Numeric fields are unsigned big-endian.

/// Start tag.
pub const START: &str = "Start";
pub const VOLTAGE: &str = "Voltage";
pub const CURRENT: &str = "Current";
pub const POWER: &str = "Power";
pub const ACC_WH: &str = "Acc_Wh";
pub const ACC_AH: &str = "Acc_Ah";
pub const TEMP: &str = "Temp";
pub const CURRENT_PEAK: &str = "Current_Peak";
pub const POWER_PEAK: &str = "Power_Peak";
pub const VOLTAGE_MIN: &str = "Voltage_Min";
/// End tag.
pub const END: &str = "End";

/// Wire representation of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-width ASCII tag of the given byte width.
    Tag(usize),
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 32-bit big-endian integer.
    U32Be,
}

impl FieldKind {
    /// Number of wire bytes this field occupies.
    pub const fn width(self) -> usize {
        match self {
            FieldKind::Tag(width) => width,
            FieldKind::U8 => 1,
            FieldKind::U32Be => 4,
        }
    }
}

/// How a field is carried into an output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Layout placeholder, never written.
    Skip,
    /// Written as the raw integer.
    Raw,
    /// Raw milli-units divided by 1000.
    Milli,
}

/// One entry of the frame layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub emit: Emit,
}

const fn field(name: &'static str, kind: FieldKind, emit: Emit) -> FieldSpec {
    FieldSpec { name, kind, emit }
}

/// Number of fields in a frame.
pub const FIELD_COUNT: usize = 18;

/// The frame layout, in wire order.
pub const LAYOUT: [FieldSpec; FIELD_COUNT] = [
    field(START, FieldKind::Tag(4), Emit::Skip),
    field("Unknown1", FieldKind::U8, Emit::Skip),
    field("Unknown2", FieldKind::U8, Emit::Skip),
    field("Unknown3", FieldKind::U8, Emit::Skip),
    field(VOLTAGE, FieldKind::U32Be, Emit::Milli),
    field(CURRENT, FieldKind::U32Be, Emit::Milli),
    field(POWER, FieldKind::U32Be, Emit::Milli),
    field(ACC_WH, FieldKind::U32Be, Emit::Milli),
    field(ACC_AH, FieldKind::U32Be, Emit::Milli),
    field("Unknown4", FieldKind::U8, Emit::Skip),
    field(TEMP, FieldKind::U8, Emit::Raw),
    field("Unknown5", FieldKind::U8, Emit::Skip),
    field("Unknown6", FieldKind::U8, Emit::Skip),
    field(CURRENT_PEAK, FieldKind::U32Be, Emit::Milli),
    field(POWER_PEAK, FieldKind::U32Be, Emit::Milli),
    field(VOLTAGE_MIN, FieldKind::U32Be, Emit::Milli),
    field("Unknown7", FieldKind::U8, Emit::Skip),
    field(END, FieldKind::Tag(3), Emit::Skip),
];

const fn layout_width(layout: &[FieldSpec]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < layout.len() {
        total += layout[i].kind.width();
        i += 1;
    }
    total
}

/// Size of one frame on the wire.
pub const FRAME_SIZE: usize = layout_width(&LAYOUT);

const _: () = assert!(FRAME_SIZE == 47, "meter frames are 47 bytes");

/// Position of the named field in [`LAYOUT`].
pub fn field_index(name: &str) -> Option<usize> {
    LAYOUT.iter().position(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_47_bytes() {
        assert_eq!(FRAME_SIZE, 47);
        assert_eq!(LAYOUT.iter().map(|spec| spec.kind.width()).sum::<usize>(), 47);
    }

    #[test]
    fn field_names_are_unique() {
        for (i, spec) in LAYOUT.iter().enumerate() {
            assert_eq!(field_index(spec.name), Some(i), "duplicate {}", spec.name);
        }
    }

    #[test]
    fn nine_fields_are_emitted() {
        let emitted: Vec<_> = LAYOUT
            .iter()
            .filter(|spec| spec.emit != Emit::Skip)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            emitted,
            [
                VOLTAGE,
                CURRENT,
                POWER,
                ACC_WH,
                ACC_AH,
                TEMP,
                CURRENT_PEAK,
                POWER_PEAK,
                VOLTAGE_MIN
            ]
        );
    }

    #[test]
    fn only_temp_is_emitted_raw() {
        let raw: Vec<_> = LAYOUT
            .iter()
            .filter(|spec| spec.emit == Emit::Raw)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(raw, [TEMP]);
    }

    #[test]
    fn markers_bracket_the_frame() {
        assert_eq!(LAYOUT[0].name, START);
        assert_eq!(LAYOUT[0].kind, FieldKind::Tag(4));
        assert_eq!(LAYOUT[FIELD_COUNT - 1].name, END);
        assert_eq!(LAYOUT[FIELD_COUNT - 1].kind, FieldKind::Tag(3));
    }

    #[test]
    fn unknown_field_has_no_index() {
        assert_eq!(field_index("Frequency"), None);
    }
}
