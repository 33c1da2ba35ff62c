//=========================================================================
// Host Interface
//=========================================================================
//
// Contract between the game core and the host that renders it.
//
//   host ──HostEvent──>  core      (pointer, drag, name prompt, close)
//   core ──HostFrame──>  host      (commands produced by one update)
//
// The core never loads assets or lays out UI; it names elements by
// `ElementId` and assets by path.
//
//=========================================================================

//=== ElementId ===========================================================

/// Interactive or presentational element the core addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    //--- Menu -------------------------------------------------------------
    Title,
    Start,
    NameLabel,

    //--- Play -------------------------------------------------------------
    Website,
    Generator(usize),
    GeneratorRate(usize),
    DebtCounter,
    RateCounter,
    Timer,
    Popup,
    Hint,
    Exit,

    //--- Shared -----------------------------------------------------------
    LeaderboardTitle,
    LeaderboardRow(usize),
}

//=== Host Events =========================================================

/// Pointer interaction phase on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Enter,
    Exit,
    Stay,
    /// Button released over the element (a click).
    Up,
}

/// Events sent from the host to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Pointer { element: ElementId, phase: PointerPhase },

    /// Vertical pointer movement in world units; `held` while the primary
    /// button is down.
    PointerDrag { held: bool, delta_y: f32 },

    /// Answer to [`HostCommand::PromptName`]; `None` when cancelled.
    NameEntered(Option<String>),

    WindowClosed,
}

//=== Host Commands =======================================================

/// RGBA tint in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Tint = Tint::rgb(0.0, 0.0, 0.0);
    pub const DIMMED: Tint = Tint::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Click,
    Purchase,
}

impl SoundCue {
    pub fn path(self) -> &'static str {
        match self {
            Self::Click => "Sounds/buy.mp3",
            Self::Purchase => "Sounds/ka-ching.mp3",
        }
    }

    pub fn volume(self) -> f32 {
        match self {
            Self::Click => 0.35,
            Self::Purchase => 0.5,
        }
    }
}

//--- Asset Paths ---------------------------------------------------------

pub const MENU_MUSIC: &str = "Sounds/menu.mp3";
pub const PLAY_MUSIC: &str = "Sounds/main.mp3";
pub const BLOCKED_WEBSITE: &str = "Textures/WebsiteBlocked.png";

/// Path of the `index`-th website texture.
pub fn website_texture(index: u32) -> String {
    format!("Textures/Website{}.png", index)
}

/// Presentation commands sent from the core to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    SetText { element: ElementId, text: String },
    SetVisible { element: ElementId, visible: bool },
    SetScale { element: ElementId, scale: f32 },
    SetRotation { element: ElementId, radians: f32 },
    SetTint { element: ElementId, tint: Tint },
    SetTexture { element: ElementId, path: String },

    /// Displaces `element` from its laid-out position.
    SetOffset { element: ElementId, x: f32, y: f32 },

    /// Moves `element` next to `anchor`, offset vertically.
    AnchorTo { element: ElementId, anchor: ElementId, offset_y: f32 },

    SetCameraZoom(f32),
    SetCameraOffset { x: f32, y: f32 },

    PlaySound(SoundCue),
    PlayMusic { path: &'static str, looped: bool },

    /// Dollar particle burst at an element.
    BurstParticles { at: ElementId, amount: u8 },

    /// Asks the player for a name, pre-filled with `preview`.
    PromptName { message: String, preview: String },
}

/// Commands produced by one core update, in order.
pub type HostFrame = Vec<HostCommand>;
