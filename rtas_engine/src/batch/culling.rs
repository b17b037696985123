/// Culling policy - structure-level inclusion rules.
///
/// The policy is configuration only: the session hands it to the backend
/// once per frame and the backend decides, per instance, what ends up in
/// the built structure.

use bitflags::bitflags;

/// Layer mask admitting every layer.
pub const LAYER_MASK_ALL: u32 = u32::MAX;

/// Instance mask admitting every instance.
pub const INSTANCE_MASK_ALL: u8 = 0xFF;

bitflags! {
    /// Per-submesh ray tracing flags.
    ///
    /// The empty set means the submesh is excluded (`DISABLED`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SubMeshFlags: u32 {
        /// Submesh participates in the structure
        const ENABLED = 1 << 0;
        /// Traversal stops at the closest hit; no any-hit shader invocation
        const CLOSEST_HIT_ONLY = 1 << 1;
        /// Any-hit shader invoked at most once per primitive
        const UNIQUE_ANY_HIT_CALLS = 1 << 2;
    }
}

impl SubMeshFlags {
    /// Submesh excluded from the structure.
    pub const DISABLED: SubMeshFlags = SubMeshFlags::empty();

    /// Whether the submesh participates at all.
    pub fn is_enabled(&self) -> bool {
        self.contains(SubMeshFlags::ENABLED)
    }
}

/// Shadow casting mode of a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowCastingMode {
    Off,
    On,
    TwoSided,
    ShadowsOnly,
}

bitflags! {
    /// Set of shadow casting modes admitted by a policy.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShadowCastingModes: u32 {
        const OFF = 1 << 0;
        const ON = 1 << 1;
        const TWO_SIDED = 1 << 2;
        const SHADOWS_ONLY = 1 << 3;
    }
}

impl ShadowCastingModes {
    /// Whether `mode` is in the set.
    pub fn admits(&self, mode: ShadowCastingMode) -> bool {
        let bit = match mode {
            ShadowCastingMode::Off => ShadowCastingModes::OFF,
            ShadowCastingMode::On => ShadowCastingModes::ON,
            ShadowCastingMode::TwoSided => ShadowCastingModes::TWO_SIDED,
            ShadowCastingMode::ShadowsOnly => ShadowCastingModes::SHADOWS_ONLY,
        };
        self.contains(bit)
    }
}

/// Material class, as far as ray tracing inclusion is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialClass {
    Opaque,
    AlphaTested,
    Transparent,
}

/// Sub-mesh flags applied per material class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMeshFlagsConfig {
    pub opaque: SubMeshFlags,
    pub alpha_tested: SubMeshFlags,
    pub transparent: SubMeshFlags,
}

impl Default for SubMeshFlagsConfig {
    fn default() -> Self {
        Self {
            opaque: SubMeshFlags::ENABLED | SubMeshFlags::CLOSEST_HIT_ONLY,
            alpha_tested: SubMeshFlags::ENABLED,
            transparent: SubMeshFlags::DISABLED,
        }
    }
}

/// Static culling configuration, built once and passed to every frame.
///
/// `CullingPolicy::default()` admits opaque and alpha-tested materials on
/// every layer, mask bit and shadow mode, and rejects transparent ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CullingPolicy {
    pub sub_mesh_flags: SubMeshFlagsConfig,
    pub allow_opaque_materials: bool,
    pub allow_alpha_tested_materials: bool,
    pub allow_transparent_materials: bool,
    pub instance_mask: u8,
    pub layer_mask: u32,
    pub shadow_casting_modes: ShadowCastingModes,
}

impl Default for CullingPolicy {
    fn default() -> Self {
        Self {
            sub_mesh_flags: SubMeshFlagsConfig::default(),
            allow_opaque_materials: true,
            allow_alpha_tested_materials: true,
            allow_transparent_materials: false,
            instance_mask: INSTANCE_MASK_ALL,
            layer_mask: LAYER_MASK_ALL,
            shadow_casting_modes: ShadowCastingModes::all(),
        }
    }
}

impl CullingPolicy {
    /// Flags the policy assigns to submeshes of this material class.
    pub fn sub_mesh_flags_for(&self, class: MaterialClass) -> SubMeshFlags {
        match class {
            MaterialClass::Opaque => self.sub_mesh_flags.opaque,
            MaterialClass::AlphaTested => self.sub_mesh_flags.alpha_tested,
            MaterialClass::Transparent => self.sub_mesh_flags.transparent,
        }
    }

    /// Whether the material class passes the instance test.
    pub fn allows_class(&self, class: MaterialClass) -> bool {
        match class {
            MaterialClass::Opaque => self.allow_opaque_materials,
            MaterialClass::AlphaTested => self.allow_alpha_tested_materials,
            MaterialClass::Transparent => self.allow_transparent_materials,
        }
    }

    /// Full inclusion test for one instance.
    ///
    /// `layer` is a layer index (0..32); instances on layers outside the
    /// mask, with no overlapping mask bits, or with a rejected shadow mode
    /// are left out of the built structure.
    pub fn admits(
        &self,
        class: MaterialClass,
        layer: u32,
        shadow_casting_mode: ShadowCastingMode,
        instance_mask: u8,
    ) -> bool {
        let on_layer = layer < 32 && self.layer_mask & (1u32 << layer) != 0;

        self.allows_class(class)
            && self.sub_mesh_flags_for(class).is_enabled()
            && on_layer
            && self.instance_mask & instance_mask != 0
            && self.shadow_casting_modes.admits(shadow_casting_mode)
    }
}

#[cfg(test)]
#[path = "culling_tests.rs"]
mod tests;
