use crate::adapter_selection::select_adapter;
use crate::adapter_selection::AdapterCandidate;
use crate::feature_level::create_with_highest_level;
use crate::feature_level::FeatureLevel;
use crate::sample_command_line::SampleCommandLine;
use crate::sample_error::CallContext;
use crate::sample_error::GraphicsError;
use tracing::info;
use tracing::warn;
use widestring::U16CStr;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

pub struct DeviceContext {
    pub factory: IDXGIFactory4,
    pub device: ID3D12Device,
    pub feature_level: FeatureLevel,
}

pub fn create_device(command_line: &SampleCommandLine) -> Result<DeviceContext, GraphicsError> {
    let mut factory_flags = DXGI_CREATE_FACTORY_FLAGS(0);
    if command_line.debug_layer_enabled() && enable_debug_layer() {
        factory_flags |= DXGI_CREATE_FACTORY_DEBUG;
    }

    let factory: IDXGIFactory4 =
        unsafe { CreateDXGIFactory2(factory_flags) }.for_call("CreateDXGIFactory2")?;

    let adapter = if command_line.warp {
        info!("Using WARP adapter.");
        unsafe { factory.EnumWarpAdapter() }.for_call("IDXGIFactory4::EnumWarpAdapter")?
    } else {
        select_hardware_adapter(&factory)?
    };

    let (feature_level, device) = create_with_highest_level(|level| -> Result<_, GraphicsError> {
        let mut device: Option<ID3D12Device> = None;
        unsafe { D3D12CreateDevice(&adapter, d3d_feature_level(level), &mut device) }
            .for_call("D3D12CreateDevice")?;
        device.ok_or(GraphicsError::Unavailable("ID3D12Device"))
    })
    .map_err(|last_error| GraphicsError::NoFeatureLevel {
        last_error: last_error.map(Box::new),
    })?;

    Ok(DeviceContext {
        factory,
        device,
        feature_level,
    })
}

fn enable_debug_layer() -> bool {
    unsafe {
        let mut debug: Option<ID3D12Debug> = None;
        if let Some(debug) = D3D12GetDebugInterface(&mut debug).ok().and(debug) {
            debug.EnableDebugLayer();
            info!("D3D12 Debug Layer Enabled");
            true
        } else {
            warn!("D3D12 Debug Layer unavailable.");
            false
        }
    }
}

pub fn d3d_feature_level(level: FeatureLevel) -> D3D_FEATURE_LEVEL {
    match level {
        FeatureLevel::Level12_1 => D3D_FEATURE_LEVEL_12_1,
        FeatureLevel::Level12_0 => D3D_FEATURE_LEVEL_12_0,
        FeatureLevel::Level11_1 => D3D_FEATURE_LEVEL_11_1,
        FeatureLevel::Level11_0 => D3D_FEATURE_LEVEL_11_0,
    }
}

fn select_hardware_adapter(factory: &IDXGIFactory4) -> Result<IDXGIAdapter1, GraphicsError> {
    let mut adapters = enumerate_adapters(factory)?;
    let candidates: Vec<AdapterCandidate> =
        adapters.iter().map(|(_, candidate)| candidate.clone()).collect();
    let selected = select_adapter(&candidates).ok_or(GraphicsError::NoAdapter)?;
    info!(
        "Using adapter {}: {} ({} MiB dedicated)",
        selected.index,
        selected.description,
        selected.dedicated_video_memory / (1024 * 1024)
    );
    let position = candidates
        .iter()
        .position(|c| c.index == selected.index)
        .ok_or(GraphicsError::NoAdapter)?;
    Ok(adapters.swap_remove(position).0)
}

fn enumerate_adapters(
    factory: &IDXGIFactory4,
) -> Result<Vec<(IDXGIAdapter1, AdapterCandidate)>, GraphicsError> {
    let mut adapters = Vec::new();
    for index in 0.. {
        let adapter = match unsafe { factory.EnumAdapters1(index) } {
            Ok(adapter) => adapter,
            Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => break, // No more adapters
            Err(e) => return Err(e).for_call("IDXGIFactory1::EnumAdapters1"),
        };

        let desc = match unsafe { adapter.GetDesc1() } {
            Ok(desc) => desc,
            Err(e) => {
                warn!("Skipping adapter {index}, GetDesc1 failed: {e}");
                continue;
            }
        };

        let description = U16CStr::from_slice_truncate(&desc.Description)
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let is_software = (DXGI_ADAPTER_FLAG(desc.Flags as i32) & DXGI_ADAPTER_FLAG_SOFTWARE)
            != DXGI_ADAPTER_FLAG_NONE;
        info!(
            "  Adapter {index}: {description}{}",
            if is_software { " (software)" } else { "" }
        );

        adapters.push((
            adapter,
            AdapterCandidate {
                index,
                description,
                dedicated_video_memory: desc.DedicatedVideoMemory,
                is_software,
            },
        ));
    }
    Ok(adapters)
}
