use bytemuck::Pod;
use sample_host::sample_error::CallContext;
use sample_host::GraphicsError;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;

/// Creates a buffer on the upload heap and copies `data` into it.
///
/// The GPU reads it directly every frame, which is fine for a handful of
/// vertices.
pub fn create_upload_buffer<T: Pod>(
    device: &ID3D12Device,
    data: &[T],
) -> Result<ID3D12Resource, GraphicsError> {
    let bytes: &[u8] = bytemuck::cast_slice(data);

    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_UPLOAD,
        ..Default::default()
    };
    let resource_desc = D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_BUFFER,
        Alignment: 0,
        Width: bytes.len() as u64,
        Height: 1,
        DepthOrArraySize: 1,
        MipLevels: 1,
        Format: DXGI_FORMAT_UNKNOWN,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_ROW_MAJOR,
        Flags: D3D12_RESOURCE_FLAG_NONE,
    };

    let mut buffer: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &resource_desc,
            D3D12_RESOURCE_STATE_GENERIC_READ,
            None,
            &mut buffer,
        )
    }
    .for_call("ID3D12Device::CreateCommittedResource")?;
    let buffer = buffer.ok_or(GraphicsError::Unavailable("upload buffer"))?;

    unsafe {
        let mut mapped = std::ptr::null_mut();
        // Nothing is read back.
        let read_range = D3D12_RANGE { Begin: 0, End: 0 };
        buffer
            .Map(0, Some(&read_range), Some(&mut mapped))
            .for_call("ID3D12Resource::Map")?;
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), mapped as *mut u8, bytes.len());
        buffer.Unmap(0, None);
    }

    Ok(buffer)
}

pub fn vertex_buffer_view(
    buffer: &ID3D12Resource,
    stride: u32,
    size_in_bytes: usize,
) -> D3D12_VERTEX_BUFFER_VIEW {
    D3D12_VERTEX_BUFFER_VIEW {
        BufferLocation: unsafe { buffer.GetGPUVirtualAddress() },
        StrideInBytes: stride,
        SizeInBytes: size_in_bytes as u32,
    }
}

/// View over 16-bit indices.
pub fn index_buffer_view(buffer: &ID3D12Resource, size_in_bytes: usize) -> D3D12_INDEX_BUFFER_VIEW {
    D3D12_INDEX_BUFFER_VIEW {
        BufferLocation: unsafe { buffer.GetGPUVirtualAddress() },
        SizeInBytes: size_in_bytes as u32,
        Format: DXGI_FORMAT_R16_UINT,
    }
}
