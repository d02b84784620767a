use std::fmt;

/// One attribute of a player's stat sheet. Discriminants index into
/// [`PlayerRecord`] storage and follow the canonical wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stat {
    Speed,
    FireRate,
    Reload,
    Damage1,
    Damage2,
    Damage3,
    JumpHeight,
    MagSize,
    Ammo,
    FireDamage,
    IceDamage,
    ShockDamage,
    Zoom,
    Armor,
    TransferRate,
    MaxRank,
    EPoint,
    Character1,
    Character2,
    Character3,
    Skin,
    Wins,
    Losses,
}

impl Stat {
    pub const COUNT: usize = 23;

    pub const ALL: [Stat; Self::COUNT] = [
        Self::Speed,
        Self::FireRate,
        Self::Reload,
        Self::Damage1,
        Self::Damage2,
        Self::Damage3,
        Self::JumpHeight,
        Self::MagSize,
        Self::Ammo,
        Self::FireDamage,
        Self::IceDamage,
        Self::ShockDamage,
        Self::Zoom,
        Self::Armor,
        Self::TransferRate,
        Self::MaxRank,
        Self::EPoint,
        Self::Character1,
        Self::Character2,
        Self::Character3,
        Self::Skin,
        Self::Wins,
        Self::Losses,
    ];

    /// Field name used in the stored and wire field maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::FireRate => "FireRate",
            Self::Reload => "Reload",
            Self::Damage1 => "Damage1",
            Self::Damage2 => "Damage2",
            Self::Damage3 => "Damage3",
            Self::JumpHeight => "JumpHeight",
            Self::MagSize => "MagSize",
            Self::Ammo => "Ammo",
            Self::FireDamage => "FireDamage",
            Self::IceDamage => "IceDamage",
            Self::ShockDamage => "ShockDamage",
            Self::Zoom => "Zoom",
            Self::Armor => "Armor",
            Self::TransferRate => "TransferRate",
            Self::MaxRank => "MaxRank",
            Self::EPoint => "EPoint",
            Self::Character1 => "Character1",
            Self::Character2 => "Character2",
            Self::Character3 => "Character3",
            Self::Skin => "Skin",
            Self::Wins => "Wins",
            Self::Losses => "Losses",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded, all-integer stat sheet. Values are unsigned so the
/// non-negative invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayerRecord {
    values: [u32; Stat::COUNT],
}

impl PlayerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> u32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        self.values[stat.index()] = value;
    }

    /// Adds `delta`, saturating at `u32::MAX`.
    pub fn increment(&mut self, stat: Stat, delta: u32) {
        let slot = &mut self.values[stat.index()];
        *slot = slot.saturating_add(delta);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::ALL.into_iter().map(|stat| (stat, self.get(stat)))
    }

    pub fn with(mut self, stat: Stat, value: u32) -> Self {
        self.set(stat, value);
        self
    }
}
