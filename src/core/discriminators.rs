/// Separator symbols of the three-level stream grammar.
///
/// ```text
/// moduleStream    := moduleId DEVICE (deviceEntry)* MODULE
/// deviceEntry     := deviceId DEVICE deviceFragment
/// deviceFragment  := datum (DATUM datum)* DEVICE
/// ```
///
/// These are protocol constants shared by every producer and consumer;
/// changing one is a breaking change. Payload text is not escaped.
pub struct Discriminators;

impl Discriminators {
    pub const DATUM: char = ',';
    pub const DEVICE: char = ':';
    pub const MODULE: char = ';';

    pub const ALL: [char; 3] = [Self::DATUM, Self::DEVICE, Self::MODULE];
}
