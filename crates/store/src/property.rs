//! The closed set of CSS properties the editor exposes and diffs.
//!
//! A closed enumeration instead of free-form strings: snapshots, panel
//! grouping, and diffing are exhaustiveness-checked, and a typo'd property
//! name cannot silently create a phantom entry.

/// Which editor panel section a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyGroup {
    Layout,
    FlexGrid,
    Typography,
    Appearance,
    BorderOutline,
    Spacing,
}

/// One tracked CSS property. Declaration order is panel order and the
/// order diffs are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedProperty {
    Display,
    Position,
    Top,
    Right,
    Bottom,
    Left,
    ZIndex,
    Width,
    Height,
    MinWidth,
    MaxWidth,
    Overflow,
    FlexDirection,
    FlexWrap,
    JustifyContent,
    AlignItems,
    Gap,
    FlexGrow,
    FlexShrink,
    FlexBasis,
    AlignSelf,
    GridTemplateColumns,
    GridTemplateRows,
    GridAutoFlow,
    ColumnGap,
    RowGap,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    LetterSpacing,
    TextAlign,
    TextDecoration,
    TextTransform,
    FontStyle,
    WordSpacing,
    Color,
    Opacity,
    BorderRadius,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomLeftRadius,
    BorderBottomRightRadius,
    Cursor,
    BackgroundColor,
    BorderStyle,
    BorderWidth,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    BorderColor,
    OutlineStyle,
    OutlineWidth,
    OutlineColor,
    OutlineOffset,
    BoxShadow,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
}

impl TrackedProperty {
    /// Every tracked property in declaration order.
    pub const ALL: [Self; 65] = [
        Self::Display,
        Self::Position,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
        Self::ZIndex,
        Self::Width,
        Self::Height,
        Self::MinWidth,
        Self::MaxWidth,
        Self::Overflow,
        Self::FlexDirection,
        Self::FlexWrap,
        Self::JustifyContent,
        Self::AlignItems,
        Self::Gap,
        Self::FlexGrow,
        Self::FlexShrink,
        Self::FlexBasis,
        Self::AlignSelf,
        Self::GridTemplateColumns,
        Self::GridTemplateRows,
        Self::GridAutoFlow,
        Self::ColumnGap,
        Self::RowGap,
        Self::FontFamily,
        Self::FontSize,
        Self::FontWeight,
        Self::LineHeight,
        Self::LetterSpacing,
        Self::TextAlign,
        Self::TextDecoration,
        Self::TextTransform,
        Self::FontStyle,
        Self::WordSpacing,
        Self::Color,
        Self::Opacity,
        Self::BorderRadius,
        Self::BorderTopLeftRadius,
        Self::BorderTopRightRadius,
        Self::BorderBottomLeftRadius,
        Self::BorderBottomRightRadius,
        Self::Cursor,
        Self::BackgroundColor,
        Self::BorderStyle,
        Self::BorderWidth,
        Self::BorderTopWidth,
        Self::BorderRightWidth,
        Self::BorderBottomWidth,
        Self::BorderLeftWidth,
        Self::BorderColor,
        Self::OutlineStyle,
        Self::OutlineWidth,
        Self::OutlineColor,
        Self::OutlineOffset,
        Self::BoxShadow,
        Self::PaddingTop,
        Self::PaddingRight,
        Self::PaddingBottom,
        Self::PaddingLeft,
        Self::MarginTop,
        Self::MarginRight,
        Self::MarginBottom,
        Self::MarginLeft,
    ];

    /// The canonical kebab-case CSS name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Position => "position",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::ZIndex => "z-index",
            Self::Width => "width",
            Self::Height => "height",
            Self::MinWidth => "min-width",
            Self::MaxWidth => "max-width",
            Self::Overflow => "overflow",
            Self::FlexDirection => "flex-direction",
            Self::FlexWrap => "flex-wrap",
            Self::JustifyContent => "justify-content",
            Self::AlignItems => "align-items",
            Self::Gap => "gap",
            Self::FlexGrow => "flex-grow",
            Self::FlexShrink => "flex-shrink",
            Self::FlexBasis => "flex-basis",
            Self::AlignSelf => "align-self",
            Self::GridTemplateColumns => "grid-template-columns",
            Self::GridTemplateRows => "grid-template-rows",
            Self::GridAutoFlow => "grid-auto-flow",
            Self::ColumnGap => "column-gap",
            Self::RowGap => "row-gap",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::FontWeight => "font-weight",
            Self::LineHeight => "line-height",
            Self::LetterSpacing => "letter-spacing",
            Self::TextAlign => "text-align",
            Self::TextDecoration => "text-decoration",
            Self::TextTransform => "text-transform",
            Self::FontStyle => "font-style",
            Self::WordSpacing => "word-spacing",
            Self::Color => "color",
            Self::Opacity => "opacity",
            Self::BorderRadius => "border-radius",
            Self::BorderTopLeftRadius => "border-top-left-radius",
            Self::BorderTopRightRadius => "border-top-right-radius",
            Self::BorderBottomLeftRadius => "border-bottom-left-radius",
            Self::BorderBottomRightRadius => "border-bottom-right-radius",
            Self::Cursor => "cursor",
            Self::BackgroundColor => "background-color",
            Self::BorderStyle => "border-style",
            Self::BorderWidth => "border-width",
            Self::BorderTopWidth => "border-top-width",
            Self::BorderRightWidth => "border-right-width",
            Self::BorderBottomWidth => "border-bottom-width",
            Self::BorderLeftWidth => "border-left-width",
            Self::BorderColor => "border-color",
            Self::OutlineStyle => "outline-style",
            Self::OutlineWidth => "outline-width",
            Self::OutlineColor => "outline-color",
            Self::OutlineOffset => "outline-offset",
            Self::BoxShadow => "box-shadow",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::MarginTop => "margin-top",
            Self::MarginRight => "margin-right",
            Self::MarginBottom => "margin-bottom",
            Self::MarginLeft => "margin-left",
        }
    }

    /// Reverse lookup from a kebab-case CSS name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|property| property.name() == name)
    }

    pub const fn group(self) -> PropertyGroup {
        match self {
            Self::Display
            | Self::Position
            | Self::Top
            | Self::Right
            | Self::Bottom
            | Self::Left
            | Self::ZIndex
            | Self::Width
            | Self::Height
            | Self::MinWidth
            | Self::MaxWidth
            | Self::Overflow => PropertyGroup::Layout,
            Self::FlexDirection
            | Self::FlexWrap
            | Self::JustifyContent
            | Self::AlignItems
            | Self::Gap
            | Self::FlexGrow
            | Self::FlexShrink
            | Self::FlexBasis
            | Self::AlignSelf
            | Self::GridTemplateColumns
            | Self::GridTemplateRows
            | Self::GridAutoFlow
            | Self::ColumnGap
            | Self::RowGap => PropertyGroup::FlexGrid,
            Self::FontFamily
            | Self::FontSize
            | Self::FontWeight
            | Self::LineHeight
            | Self::LetterSpacing
            | Self::TextAlign
            | Self::TextDecoration
            | Self::TextTransform
            | Self::FontStyle
            | Self::WordSpacing => PropertyGroup::Typography,
            Self::Color
            | Self::Opacity
            | Self::BorderRadius
            | Self::BorderTopLeftRadius
            | Self::BorderTopRightRadius
            | Self::BorderBottomLeftRadius
            | Self::BorderBottomRightRadius
            | Self::Cursor
            | Self::BackgroundColor => PropertyGroup::Appearance,
            Self::BorderStyle
            | Self::BorderWidth
            | Self::BorderTopWidth
            | Self::BorderRightWidth
            | Self::BorderBottomWidth
            | Self::BorderLeftWidth
            | Self::BorderColor
            | Self::OutlineStyle
            | Self::OutlineWidth
            | Self::OutlineColor
            | Self::OutlineOffset
            | Self::BoxShadow => PropertyGroup::BorderOutline,
            Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::MarginTop
            | Self::MarginRight
            | Self::MarginBottom
            | Self::MarginLeft => PropertyGroup::Spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_for_every_property() {
        for property in TrackedProperty::ALL {
            assert_eq!(TrackedProperty::from_name(property.name()), Some(property));
        }
    }

    #[test]
    fn names_are_unique() {
        for (index, property) in TrackedProperty::ALL.iter().enumerate() {
            for other in &TrackedProperty::ALL[index + 1..] {
                assert_ne!(property.name(), other.name());
            }
        }
    }

    #[test]
    fn unknown_names_have_no_property() {
        assert_eq!(TrackedProperty::from_name("float"), None);
        assert_eq!(TrackedProperty::from_name("zIndex"), None);
    }
}
