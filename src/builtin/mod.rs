//! The standard game rules.
//!
//! `BuiltinRules::register` creates the familiar set of gameplay toggles
//! with their stock defaults and keeps the keys. Each rule is also exposed
//! as a `RuleProperty` so call sites can write
//! `builtin.keep_inventory().set(&mut server, true)`.

use crate::access::RuleProperty;
use crate::core::RuleKey;
use crate::error::Result;
use crate::rules::{GameRules, RuleConfig};

macro_rules! builtin_rules {
    ($( $field:ident, $property:ident: $ty:ty = $name:literal, $default:expr; )*) => {
        /// Keys of the standard game rules.
        #[derive(Clone, Debug)]
        pub struct BuiltinRules {
            $( pub $field: RuleKey<$ty>, )*
        }

        impl BuiltinRules {
            /// Names of the standard rules, in registration order.
            pub const NAMES: &'static [&'static str] = &[$( $name ),*];

            /// Register every standard rule with its stock default.
            ///
            /// Fails with `DuplicateName` if any of the names is taken.
            /// Rules registered before the clash stay registered.
            pub fn register<C: 'static>(rules: &mut GameRules<C>) -> Result<Self> {
                Ok(Self {
                    $( $field: rules.register($name, RuleConfig::new().with_default($default))?, )*
                })
            }

            $(
                #[must_use]
                pub fn $property(&self) -> RuleProperty<$ty> {
                    RuleProperty::new(self.$field.clone())
                }
            )*
        }
    };
}

builtin_rules! {
    do_fire_tick, has_fire_tick: bool = "doFireTick", true;
    mob_griefing, mob_griefing: bool = "mobGriefing", true;
    keep_inventory, keep_inventory: bool = "keepInventory", false;
    do_mob_spawning, has_mob_spawning: bool = "doMobSpawning", true;
    do_mob_loot, has_mob_loot: bool = "doMobLoot", true;
    do_tile_drops, has_tile_drops: bool = "doTileDrops", true;
    do_entity_drops, has_entity_drops: bool = "doEntityDrops", true;
    command_block_output, command_block_output: bool = "commandBlockOutput", true;
    natural_regeneration, natural_regeneration: bool = "naturalRegeneration", true;
    do_daylight_cycle, has_daylight_cycle: bool = "doDaylightCycle", true;
    log_admin_commands, log_admin_commands: bool = "logAdminCommands", true;
    show_death_messages, show_death_messages: bool = "showDeathMessages", true;
    random_tick_speed, random_tick_speed: i32 = "randomTickSpeed", 3;
    send_command_feedback, send_command_feedback: bool = "sendCommandFeedback", true;
    reduced_debug_info, reduced_debug_info: bool = "reducedDebugInfo", false;
    spectators_generate_chunks, spectators_generate_chunks: bool = "spectatorsGenerateChunks", true;
    spawn_radius, spawn_radius: i32 = "spawnRadius", 10;
    disable_elytra_movement_check, disable_elytra_movement_check: bool = "disableElytraMovementCheck", false;
    max_entity_cramming, max_entity_cramming: i32 = "maxEntityCramming", 24;
    do_weather_cycle, has_weather_cycle: bool = "doWeatherCycle", true;
    do_limited_crafting, has_limited_crafting: bool = "doLimitedCrafting", false;
    max_command_chain_length, max_command_chain_length: i32 = "maxCommandChainLength", 65536;
    announce_advancements, announce_advancements: bool = "announceAdvancements", true;
    disable_raids, disable_raids: bool = "disableRaids", false;
    do_insomnia, has_insomnia: bool = "doInsomnia", true;
    do_immediate_respawn, has_immediate_respawn: bool = "doImmediateRespawn", false;
    drowning_damage, has_drowning_damage: bool = "drowningDamage", true;
    fall_damage, has_fall_damage: bool = "fallDamage", true;
    fire_damage, has_fire_damage: bool = "fireDamage", true;
}
