//! Soroban host functions, authorization and resource declarations.

use super::asset::Asset;
use super::bounded::{BytesM, VecM};
use super::contract::{ContractExecutable, ScAddress, ScSymbol, ScVal};
use super::keys::Uint256;
use super::ledger::LedgerKey;

xdr_enum! {
    pub enum HostFunctionType {
        InvokeContract = 0 => "HOST_FUNCTION_TYPE_INVOKE_CONTRACT",
        CreateContract = 1 => "HOST_FUNCTION_TYPE_CREATE_CONTRACT",
        UploadContractWasm = 2 => "HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM",
        CreateContractV2 = 3 => "HOST_FUNCTION_TYPE_CREATE_CONTRACT_V2",
    }
}

xdr_enum! {
    pub enum ContractIdPreimageType {
        FromAddress = 0 => "CONTRACT_ID_PREIMAGE_FROM_ADDRESS",
        FromAsset = 1 => "CONTRACT_ID_PREIMAGE_FROM_ASSET",
    }
}

xdr_struct! {
    pub struct ContractIdPreimageFromAddress {
        pub address: ScAddress => "address",
        pub salt: Uint256 => "salt",
    }
}

xdr_union! {
    /// What a new contract's id is derived from.
    pub enum ContractIdPreimage(ContractIdPreimageType, "type") {
        ContractIdPreimageType::FromAddress => FromAddress(ContractIdPreimageFromAddress, "fromAddress"),
        ContractIdPreimageType::FromAsset => FromAsset(Asset, "fromAsset"),
    }
}

xdr_struct! {
    pub struct CreateContractArgs {
        pub contract_id_preimage: ContractIdPreimage => "contractIDPreimage",
        pub executable: ContractExecutable => "executable",
    }
}

xdr_struct! {
    /// Contract creation with constructor arguments.
    pub struct CreateContractArgsV2 {
        pub contract_id_preimage: ContractIdPreimage => "contractIDPreimage",
        pub executable: ContractExecutable => "executable",
        pub constructor_args: VecM<ScVal> => "constructorArgs",
    }
}

xdr_struct! {
    pub struct InvokeContractArgs {
        pub contract_address: ScAddress => "contractAddress",
        pub function_name: ScSymbol => "functionName",
        pub args: VecM<ScVal> => "args",
    }
}

xdr_union! {
    pub enum HostFunction(HostFunctionType, "type") {
        HostFunctionType::InvokeContract => InvokeContract(InvokeContractArgs, "invokeContract"),
        HostFunctionType::CreateContract => CreateContract(CreateContractArgs, "createContract"),
        HostFunctionType::UploadContractWasm => UploadContractWasm(BytesM, "wasm"),
        HostFunctionType::CreateContractV2 => CreateContractV2(CreateContractArgsV2, "createContractV2"),
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

xdr_enum! {
    pub enum SorobanAuthorizedFunctionType {
        ContractFn = 0 => "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN",
        CreateContractHostFn = 1 => "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN",
        CreateContractV2HostFn = 2 => "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_V2_HOST_FN",
    }
}

xdr_union! {
    pub enum SorobanAuthorizedFunction(SorobanAuthorizedFunctionType, "type") {
        SorobanAuthorizedFunctionType::ContractFn => ContractFn(InvokeContractArgs, "contractFn"),
        SorobanAuthorizedFunctionType::CreateContractHostFn => CreateContractHostFn(CreateContractArgs, "createContractHostFn"),
        SorobanAuthorizedFunctionType::CreateContractV2HostFn => CreateContractV2HostFn(CreateContractArgsV2, "createContractV2HostFn"),
    }
}

xdr_struct! {
    /// A call tree that an address authorizes. Recursive.
    pub struct SorobanAuthorizedInvocation {
        pub function: SorobanAuthorizedFunction => "function",
        pub sub_invocations: VecM<SorobanAuthorizedInvocation> => "subInvocations",
    }
}

xdr_struct! {
    pub struct SorobanAddressCredentials {
        pub address: ScAddress => "address",
        pub nonce: i64 => "nonce",
        pub signature_expiration_ledger: u32 => "signatureExpirationLedger",
        pub signature: ScVal => "signature",
    }
}

xdr_enum! {
    pub enum SorobanCredentialsType {
        SourceAccount = 0 => "SOROBAN_CREDENTIALS_SOURCE_ACCOUNT",
        Address = 1 => "SOROBAN_CREDENTIALS_ADDRESS",
    }
}

xdr_union! {
    pub enum SorobanCredentials(SorobanCredentialsType, "type") {
        SorobanCredentialsType::SourceAccount => SourceAccount,
        SorobanCredentialsType::Address => Address(SorobanAddressCredentials, "address"),
    }
}

xdr_struct! {
    pub struct SorobanAuthorizationEntry {
        pub credentials: SorobanCredentials => "credentials",
        pub root_invocation: SorobanAuthorizedInvocation => "rootInvocation",
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

xdr_struct! {
    /// The ledger keys a Soroban transaction may read and write.
    pub struct LedgerFootprint {
        pub read_only: VecM<LedgerKey> => "readOnly",
        pub read_write: VecM<LedgerKey> => "readWrite",
    }
}

xdr_struct! {
    pub struct SorobanResources {
        pub footprint: LedgerFootprint => "footprint",
        pub instructions: u32 => "instructions",
        pub disk_read_bytes: u32 => "diskReadBytes",
        pub write_bytes: u32 => "writeBytes",
    }
}

xdr_struct! {
    /// Indices into the footprint of archived entries to restore.
    pub struct SorobanResourcesExtV0 {
        pub archived_soroban_entries: VecM<u32> => "archivedSorobanEntries",
    }
}

xdr_union! {
    pub enum SorobanTransactionDataExt(i32, "v") {
        0 => V0,
        1 => V1(SorobanResourcesExtV0, "resourceExt"),
    }
}

xdr_struct! {
    /// Resource declaration and fee attached to a Soroban transaction.
    pub struct SorobanTransactionData {
        pub ext: SorobanTransactionDataExt => "ext",
        pub resources: SorobanResources => "resources",
        pub resource_fee: i64 => "resourceFee",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{Hash, XdrCodec};

    fn invocation(depth: usize) -> SorobanAuthorizedInvocation {
        let function = SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
            contract_address: ScAddress::Contract(Hash([depth as u8; 32])),
            function_name: "transfer".try_into().unwrap(),
            args: vec![ScVal::from(depth as u32)].try_into().unwrap(),
        });
        let sub_invocations = if depth == 0 {
            VecM::new()
        } else {
            vec![invocation(depth - 1)].try_into().unwrap()
        };
        SorobanAuthorizedInvocation {
            function,
            sub_invocations,
        }
    }

    #[test]
    fn authorization_tree_roundtrip() {
        let entry = SorobanAuthorizationEntry {
            credentials: SorobanCredentials::SourceAccount,
            root_invocation: invocation(3),
        };
        let bytes = entry.to_xdr().unwrap();
        assert_eq!(SorobanAuthorizationEntry::from_xdr(&bytes).unwrap(), entry);
    }

    #[test]
    fn transaction_data_v1_extension_roundtrip() {
        let data = SorobanTransactionData {
            ext: SorobanTransactionDataExt::V1(SorobanResourcesExtV0 {
                archived_soroban_entries: vec![0, 2].try_into().unwrap(),
            }),
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only: VecM::new(),
                    read_write: VecM::new(),
                },
                instructions: 1_000_000,
                disk_read_bytes: 2048,
                write_bytes: 1024,
            },
            resource_fee: 50_000,
        };
        let bytes = data.to_xdr().unwrap();
        assert_eq!(SorobanTransactionData::from_xdr(&bytes).unwrap(), data);
    }
}
