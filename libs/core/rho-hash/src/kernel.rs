// [libs/core/rho-hash/src/kernel.rs]
/*!
 * =================================================================
 * APARATO: WGSL KERNEL SPECIALIZATION (V2.0)
 * CLASIFICACIÓN: DOMAIN ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: SUSTITUCIÓN DE PLANTILLA PARA EL GPU WALKER
 * =================================================================
 */
//!
//! The WGSL compute kernel template. WGSL has no preprocessor, so the
//! miner's build-time constants (steps per dispatch, DP buffer size,
//! hash geometry, workgroup size) are injected by string substitution
//! of named `{{PLACEHOLDER}}` tokens before the shader module is
//! compiled. Keeping the placeholders named rather than positional
//! keeps the substitution surface self-documenting.

use crate::instance::HashInstance;

/// The raw shader source, parameterised by the placeholders substituted
/// in [`specialize`].
pub const CHAIN_WALKER_TEMPLATE: &str = include_str!("kernel.wgsl");

/// Compile-time parameters for one GPU dispatch of the chain walker.
#[derive(Debug, Clone, Copy)]
pub struct KernelParams {
    pub steps_per_task: u32,
    pub max_dps_per_call: u32,
    pub workgroup_size: u32,
    pub instance: HashInstance,
}

impl KernelParams {
    /// Substitute every named placeholder in [`CHAIN_WALKER_TEMPLATE`]
    /// with this configuration's concrete values, producing WGSL ready
    /// to hand to `wgpu::Device::create_shader_module`.
    pub fn specialize(&self) -> String {
        let instance = &self.instance;
        CHAIN_WALKER_TEMPLATE
            .replace("{{STEPS_PER_TASK}}", &self.steps_per_task.to_string())
            .replace("{{MAX_DPS_PER_CALL}}", &self.max_dps_per_call.to_string())
            .replace("{{WORKGROUP_SIZE}}", &self.workgroup_size.to_string())
            .replace("{{HASH_PREFIX_BYTES}}", &instance.prefix_bytes.to_string())
            .replace("{{HASH_SUFFIX_BYTES}}", &instance.suffix_bytes.to_string())
            .replace("{{HASH_TOTAL_BYTES}}", &instance.total_bytes().to_string())
            .replace("{{HASH_NUM_UINT32S}}", &instance.num_uint32s().to_string())
            .replace("{{HASH_ASCII_BYTES}}", &instance.ascii_bytes().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialize_leaves_no_placeholder_tokens_behind() {
        let params = KernelParams {
            steps_per_task: 1024,
            max_dps_per_call: 1024,
            workgroup_size: 256,
            instance: HashInstance::default(),
        };
        let specialized = params.specialize();
        assert!(!specialized.contains("{{"), "unsubstituted placeholder left in kernel source");
    }
}
