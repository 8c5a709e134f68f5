//! DOM Events
//!
//! Event types the page can expose handlers for, and listener handles.

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseEnter,
    MouseLeave,
    MouseOver,
    MouseOut,
    KeyDown,
    KeyUp,
    KeyPress,
    Focus,
    Blur,
    Change,
    Input,
    Submit,
    TouchStart,
    TouchEnd,
    TouchMove,
    Scroll,
    Resize,
    Load,
}

impl EventType {
    /// Every known event type, in inline-handler scan order
    pub const ALL: [EventType; 23] = [
        EventType::Click,
        EventType::DblClick,
        EventType::MouseDown,
        EventType::MouseUp,
        EventType::MouseMove,
        EventType::MouseEnter,
        EventType::MouseLeave,
        EventType::MouseOver,
        EventType::MouseOut,
        EventType::KeyDown,
        EventType::KeyUp,
        EventType::KeyPress,
        EventType::Focus,
        EventType::Blur,
        EventType::Change,
        EventType::Input,
        EventType::Submit,
        EventType::TouchStart,
        EventType::TouchEnd,
        EventType::TouchMove,
        EventType::Scroll,
        EventType::Resize,
        EventType::Load,
    ];

    /// Event name as used in `addEventListener`
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::DblClick => "dblclick",
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::MouseMove => "mousemove",
            EventType::MouseEnter => "mouseenter",
            EventType::MouseLeave => "mouseleave",
            EventType::MouseOver => "mouseover",
            EventType::MouseOut => "mouseout",
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::KeyPress => "keypress",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Change => "change",
            EventType::Input => "input",
            EventType::Submit => "submit",
            EventType::TouchStart => "touchstart",
            EventType::TouchEnd => "touchend",
            EventType::TouchMove => "touchmove",
            EventType::Scroll => "scroll",
            EventType::Resize => "resize",
            EventType::Load => "load",
        }
    }

}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle of a registered event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_order_and_names() {
        assert_eq!(EventType::ALL.len(), 23);
        assert_eq!(EventType::ALL[0], EventType::Click);
        assert_eq!(EventType::ALL[22], EventType::Load);
        assert_eq!(EventType::MouseEnter.as_str(), "mouseenter");
        assert_eq!(EventType::DblClick.to_string(), "dblclick");
    }
}
