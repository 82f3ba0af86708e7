use sample_host::d3d12::blob_text::blob_bytes;
use sample_host::d3d12::blob_text::blob_text;
use sample_host::sample_error::CallContext;
use sample_host::GraphicsError;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;

const SERIALIZE_CALL: &str = "D3D12SerializeRootSignature";

/// An empty root signature that only lets the input assembler read vertices.
pub fn create_root_signature(device: &ID3D12Device) -> Result<ID3D12RootSignature, GraphicsError> {
    let desc = D3D12_ROOT_SIGNATURE_DESC {
        Flags: D3D12_ROOT_SIGNATURE_FLAG_ALLOW_INPUT_ASSEMBLER_INPUT_LAYOUT,
        ..Default::default()
    };

    let mut signature_blob: Option<ID3DBlob> = None;
    let mut error_blob: Option<ID3DBlob> = None;
    let serialized = unsafe {
        D3D12SerializeRootSignature(
            &desc,
            D3D_ROOT_SIGNATURE_VERSION_1,
            &mut signature_blob,
            Some(&mut error_blob),
        )
    };
    if let Err(e) = serialized {
        return Err(match error_blob {
            Some(error) => GraphicsError::diagnostics(
                SERIALIZE_CALL,
                e.code().0,
                e.message().to_string(),
                blob_text(&error),
            ),
            None => GraphicsError::call(SERIALIZE_CALL, e.code().0, e.message().to_string()),
        });
    }
    let signature_blob = signature_blob.ok_or(GraphicsError::Unavailable("root signature blob"))?;

    unsafe { device.CreateRootSignature(0, blob_bytes(&signature_blob)) }
        .for_call("ID3D12Device::CreateRootSignature")
}
