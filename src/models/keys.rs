//! Catalog of recognized settings
//!
//! Each constant names a setting defined in the built-in defaults together
//! with the type its value is read as.

use crate::models::key::Key;
use crate::models::value::{Color, EnumValue, FontDescriptor, Rect, SettingType, ValueKind};

macro_rules! setting_keys {
    ($( $(#[$meta:meta])* $ident:ident: $ty:ty = $name:literal; )*) => {
        $(
            $(#[$meta])*
            pub const $ident: Key<$ty> = Key::new($name);
        )*

        /// Every cataloged key with the kind it is stored as
        pub const ALL: &[(&str, ValueKind)] = &[
            $( ($name, <$ty as SettingType>::KIND), )*
        ];
    };
}

setting_keys! {
    // Recorder
    FULL_SCREEN_MODE: bool = "FullScreenMode";
    ASYNC_RECORDING: bool = "AsyncRecording";
    USE_PRE_START: bool = "UsePreStart";
    /// Countdown before recording starts, in seconds
    PRE_START_VALUE: i32 = "PreStartValue";
    SHOW_CURSOR: bool = "ShowCursor";
    SNAPSHOT_MODE: bool = "SnapshotMode";
    /// Window shown on launch
    START_UP: i32 = "StartUp";
    DETECT_MOUSE_CLICKS: bool = "DetectMouseClicks";
    CLICK_COLOR: Color = "ClickColor";
    LANGUAGE_CODE: String = "LanguageCode";
    LATEST_FPS: i32 = "LatestFps";
    RECORDER_LEFT: f64 = "RecorderLeft";
    RECORDER_TOP: f64 = "RecorderTop";
    RECORDER_WIDTH: i32 = "RecorderWidth";
    RECORDER_HEIGHT: i32 = "RecorderHeight";
    START_PAUSE_SHORTCUT: EnumValue = "StartPauseShortcut";
    START_PAUSE_MODIFIERS: EnumValue = "StartPauseModifiers";
    STOP_SHORTCUT: EnumValue = "StopShortcut";
    STOP_MODIFIERS: EnumValue = "StopModifiers";
    DISCARD_SHORTCUT: EnumValue = "DiscardShortcut";
    DISCARD_MODIFIERS: EnumValue = "DiscardModifiers";
    CHECK_FOR_UPDATES: bool = "CheckForUpdates";
    GRID_COLOR_1: Color = "GridColor1";
    GRID_COLOR_2: Color = "GridColor2";
    GRID_SIZE: Rect = "GridSize";
    FIXED_FRAME_RATE: bool = "FixedFrameRate";
    /// Delay between snapshots, in milliseconds
    SNAPSHOT_DEFAULT_DELAY: i32 = "SnapshotDefaultDelay";

    // Editor
    EDITOR_TOP: f64 = "EditorTop";
    EDITOR_LEFT: f64 = "EditorLeft";
    EDITOR_HEIGHT: f64 = "EditorHeight";
    EDITOR_WIDTH: f64 = "EditorWidth";
    EDITOR_WINDOW_STATE: EnumValue = "EditorWindowState";

    // Options
    LOGS_FOLDER: String = "LogsFolder";
    TEMPORARY_FOLDER: String = "TemporaryFolder";
    AUTOMATIC_CLEAN_UP: bool = "AutomaticCleanUp";

    // Save as
    SAVE_TYPE: EnumValue = "SaveType";
    LOOPED: bool = "Looped";
    REPEAT_COUNT: i32 = "RepeatCount";
    REPEAT_FOREVER: bool = "RepeatForever";
    QUALITY: i32 = "Quality";
    MAXIMUM_COLORS: i32 = "MaximumColors";
    LATEST_OUTPUT_FOLDER: String = "LatestOutputFolder";
    LATEST_FILENAME: String = "LatestFilename";
    LATEST_EXTENSION: String = "LatestExtension";
    OVERWRITE_ON_SAVE: bool = "OverwriteOnSave";
    SAVE_TO_CLIPBOARD: bool = "SaveToClipboard";

    // Caption
    CAPTION_TEXT: String = "CaptionText";
    CAPTION_FONT: FontDescriptor = "CaptionFont";
    CAPTION_FONT_COLOR: Color = "CaptionFontColor";
    CAPTION_OUTLINE_THICKNESS: f64 = "CaptionOutlineThickness";
    CAPTION_OUTLINE_COLOR: Color = "CaptionOutlineColor";
    CAPTION_VERTICAL_ALIGNMENT: EnumValue = "CaptionVerticalAlignment";
    CAPTION_HORIZONTAL_ALIGNMENT: EnumValue = "CaptionHorizontalAlignment";
    CAPTION_MARGIN: f64 = "CaptionMargin";

    // Title frame
    TITLE_FRAME_TEXT: String = "TitleFrameText";
    TITLE_FRAME_DELAY: i32 = "TitleFrameDelay";
    TITLE_FRAME_FONT: FontDescriptor = "TitleFrameFont";
    TITLE_FRAME_FONT_COLOR: Color = "TitleFrameFontColor";
    TITLE_FRAME_BACKGROUND_COLOR: Color = "TitleFrameBackgroundColor";

    // Transitions
    FADE_TO_COLOR: Color = "FadeToColor";
    FADE_TRANSITION_LENGTH: i32 = "FadeTransitionLength";
    FADE_TRANSITION_DELAY: i32 = "FadeTransitionDelay";
    SLIDE_TRANSITION_LENGTH: i32 = "SlideTransitionLength";
    SLIDE_TRANSITION_DELAY: i32 = "SlideTransitionDelay";
}
