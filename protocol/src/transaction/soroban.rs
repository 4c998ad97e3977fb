//! Soroban authorization and contract ids.
//!
//! A contract call that moves an account's funds needs that account's
//! authorization. Simulation returns the authorization entries a call
//! requires; entries with address credentials must be signed by the address
//! before the transaction is submitted. The signed payload is
//!
//! ```text
//! SHA256(XDR(HashIdPreimage::SorobanAuthorization {
//!     networkID, nonce, signatureExpirationLedger, invocation
//! }))
//! ```
//!
//! and the signature is stored in the credentials as
//! `Vec[Map{ public_key: Bytes, signature: Bytes }]`.

use tracing::debug;

use super::error::SigningError;
use crate::config::Network;
use crate::crypto::{sha256, KeyPair};
use crate::xdr::{
    ContractIdPreimage, Hash, HashIdPreimage, HashIdPreimageContractId,
    HashIdPreimageSorobanAuthorization, ScAddress, ScVal, SorobanAuthorizationEntry,
    SorobanCredentials, XdrCodec, XdrError,
};

/// Signs the address credentials of `entry` with `signer`, valid up to and
/// including ledger `valid_until_ledger`.
///
/// Source-account credentials need no signature of their own (the
/// transaction signature covers them) and are returned unchanged. The
/// signer must be the account the credentials name.
pub fn authorize_entry(
    entry: &SorobanAuthorizationEntry,
    signer: &KeyPair,
    valid_until_ledger: u32,
    network: &Network,
) -> Result<SorobanAuthorizationEntry, SigningError> {
    let SorobanCredentials::Address(credentials) = &entry.credentials else {
        return Ok(entry.clone());
    };

    match &credentials.address {
        ScAddress::Account(account) if account.as_bytes() == signer.public_key_bytes() => {}
        other => {
            return Err(SigningError::CredentialMismatch {
                signer: signer.account_id(),
                address: other.to_strkey(),
            })
        }
    }

    let preimage = HashIdPreimage::SorobanAuthorization(HashIdPreimageSorobanAuthorization {
        network_id: Hash(network.network_id()),
        nonce: credentials.nonce,
        signature_expiration_ledger: valid_until_ledger,
        invocation: entry.root_invocation.clone(),
    });
    let payload = sha256(&preimage.to_xdr()?);
    let signature = signer.sign(&payload)?;

    let signature_value = ScVal::vec(vec![ScVal::map(vec![
        (
            ScVal::symbol("public_key")?,
            ScVal::bytes(signer.public_key_bytes())?,
        ),
        (ScVal::symbol("signature")?, ScVal::bytes(&signature)?),
    ])?])?;

    let mut signed = credentials.clone();
    signed.signature_expiration_ledger = valid_until_ledger;
    signed.signature = signature_value;
    debug!(
        signer = %signer.account_id(),
        valid_until_ledger,
        "authorization entry signed"
    );
    Ok(SorobanAuthorizationEntry {
        credentials: SorobanCredentials::Address(signed),
        root_invocation: entry.root_invocation.clone(),
    })
}

/// The id of the contract `preimage` deploys on `network`.
pub fn contract_id(network: &Network, preimage: ContractIdPreimage) -> Result<Hash, XdrError> {
    let preimage = HashIdPreimage::ContractId(HashIdPreimageContractId {
        network_id: Hash(network.network_id()),
        contract_id_preimage: preimage,
    });
    Ok(Hash(sha256(&preimage.to_xdr()?)))
}

/// [`contract_id`] as a `C…` address.
pub fn contract_address(network: &Network, preimage: ContractIdPreimage) -> Result<String, XdrError> {
    Ok(crate::strkey::encode_contract(&contract_id(network, preimage)?.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{
        Asset, InvokeContractArgs, SorobanAddressCredentials, SorobanAuthorizedFunction,
        SorobanAuthorizedInvocation, VecM,
    };

    fn invocation() -> SorobanAuthorizedInvocation {
        SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                contract_address: ScAddress::Contract(Hash([4; 32])),
                function_name: "transfer".try_into().unwrap(),
                args: VecM::new(),
            }),
            sub_invocations: VecM::new(),
        }
    }

    fn address_entry(address: ScAddress) -> SorobanAuthorizationEntry {
        SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address,
                nonce: 42,
                signature_expiration_ledger: 0,
                signature: ScVal::Void,
            }),
            root_invocation: invocation(),
        }
    }

    #[test]
    fn test_source_account_credentials_pass_through() {
        let entry = SorobanAuthorizationEntry {
            credentials: SorobanCredentials::SourceAccount,
            root_invocation: invocation(),
        };
        let kp = KeyPair::random();
        assert_eq!(
            authorize_entry(&entry, &kp, 100, &Network::testnet()).unwrap(),
            entry
        );
    }

    #[test]
    fn test_address_credentials_are_signed() {
        let kp = KeyPair::random();
        let entry = address_entry(ScAddress::Account(kp.xdr_account_id()));
        let signed = authorize_entry(&entry, &kp, 1_000, &Network::testnet()).unwrap();

        let SorobanCredentials::Address(creds) = &signed.credentials else {
            panic!("credentials changed kind");
        };
        assert_eq!(creds.signature_expiration_ledger, 1_000);
        assert_eq!(creds.nonce, 42);

        // Recompute the payload and check the stored signature against it.
        let preimage = HashIdPreimage::SorobanAuthorization(HashIdPreimageSorobanAuthorization {
            network_id: Hash(Network::testnet().network_id()),
            nonce: 42,
            signature_expiration_ledger: 1_000,
            invocation: invocation(),
        });
        let payload = sha256(&preimage.to_xdr().unwrap());
        let expected = kp.sign(&payload).unwrap();
        let ScVal::Vec(Some(items)) = &creds.signature else {
            panic!("signature is not a vec");
        };
        let ScVal::Map(Some(entries)) = &items[0] else {
            panic!("signature entry is not a map");
        };
        assert_eq!(entries[1].val, ScVal::bytes(&expected).unwrap());
        assert!(kp.verify(&payload, &expected));
    }

    #[test]
    fn test_mismatched_signer_is_rejected() {
        let kp = KeyPair::random();
        let other = KeyPair::random();
        let entry = address_entry(ScAddress::Account(other.xdr_account_id()));
        assert!(matches!(
            authorize_entry(&entry, &kp, 1, &Network::testnet()),
            Err(SigningError::CredentialMismatch { .. })
        ));

        let contract = address_entry(ScAddress::Contract(Hash([1; 32])));
        assert!(matches!(
            authorize_entry(&contract, &kp, 1, &Network::testnet()),
            Err(SigningError::CredentialMismatch { .. })
        ));
    }

    #[test]
    fn test_public_only_signer_fails() {
        let kp = KeyPair::random();
        let entry = address_entry(ScAddress::Account(kp.xdr_account_id()));
        assert_eq!(
            authorize_entry(&entry, &kp.to_public_only(), 1, &Network::testnet()),
            Err(SigningError::MissingSecretKey)
        );
    }

    #[test]
    fn test_contract_id_depends_on_network() {
        let preimage = ContractIdPreimage::FromAsset(Asset::Native);
        let testnet = contract_id(&Network::testnet(), preimage.clone()).unwrap();
        let public = contract_id(&Network::public(), preimage.clone()).unwrap();
        assert_ne!(testnet, public);
        assert!(contract_address(&Network::testnet(), preimage)
            .unwrap()
            .starts_with('C'));
    }
}
