//! In-process signer backing offline sessions

use miniscript::bitcoin::{
    bip32::{Xpriv, Xpub},
    secp256k1::{All, Secp256k1},
};

use crate::{error::SdkError, model::LiquidNetwork};

/// BIP32 seeds are between 128 and 512 bits.
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

pub struct SdkSigner {
    xprv: Xpriv,
    secp: Secp256k1<All>,
}

impl std::fmt::Debug for SdkSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkSigner")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

impl SdkSigner {
    pub fn from_mnemonic(
        mnemonic: &str,
        passphrase: Option<&str>,
        network: LiquidNetwork,
    ) -> Result<Self, SdkError> {
        let mnemonic: bip39::Mnemonic = mnemonic
            .trim()
            .parse()
            .map_err(|e: bip39::Error| SdkError::InvalidMnemonic(e.to_string()))?;
        let seed = mnemonic.to_seed(passphrase.unwrap_or(""));
        Self::from_seed(&seed, network)
    }

    pub fn from_seed(seed: &[u8], network: LiquidNetwork) -> Result<Self, SdkError> {
        if seed.len() < MIN_SEED_LEN || seed.len() > MAX_SEED_LEN {
            return Err(SdkError::DerivationFailed(format!(
                "Seed must be between {} and {} bytes, got {}",
                MIN_SEED_LEN,
                MAX_SEED_LEN,
                seed.len()
            )));
        }
        let xprv = Xpriv::new_master(network.bitcoin_network(), seed)
            .map_err(|e| SdkError::DerivationFailed(e.to_string()))?;
        Ok(Self {
            xprv,
            secp: Secp256k1::new(),
        })
    }

    pub fn xpub(&self) -> Xpub {
        Xpub::from_priv(&self.secp, &self.xprv)
    }

    /// Hex encoded compressed public key of the master key
    pub fn pubkey(&self) -> String {
        self.xpub().public_key.to_string()
    }

    pub fn fingerprint(&self) -> String {
        self.xprv.fingerprint(&self.secp).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn master_pubkey_from_standard_mnemonic() {
        let signer = SdkSigner::from_mnemonic(MNEMONIC, None, LiquidNetwork::Testnet).unwrap();
        assert_eq!(
            signer.pubkey(),
            "03d902f35f560e0470c63313c7369168d9d7df2d49bf295fd9fb7cb109ccee0494"
        );
        assert_eq!(signer.fingerprint(), "73c5da0a");
    }

    #[test]
    fn pubkey_does_not_depend_on_network() {
        let testnet = SdkSigner::from_mnemonic(MNEMONIC, None, LiquidNetwork::Testnet).unwrap();
        let mainnet = SdkSigner::from_mnemonic(MNEMONIC, None, LiquidNetwork::Mainnet).unwrap();
        assert_eq!(testnet.pubkey(), mainnet.pubkey());
    }

    #[test]
    fn passphrase_changes_keys() {
        let plain = SdkSigner::from_mnemonic(MNEMONIC, None, LiquidNetwork::Testnet).unwrap();
        let salted =
            SdkSigner::from_mnemonic(MNEMONIC, Some("TREZOR"), LiquidNetwork::Testnet).unwrap();
        assert_ne!(plain.pubkey(), salted.pubkey());
    }

    #[test]
    fn invalid_mnemonic_is_rejected() {
        let err = SdkSigner::from_mnemonic("abandon abandon about", None, LiquidNetwork::Testnet)
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidMnemonic(_)));

        let err = SdkSigner::from_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
            None,
            LiquidNetwork::Testnet,
        )
        .unwrap_err();
        assert!(matches!(err, SdkError::InvalidMnemonic(_)));
    }

    #[test]
    fn seed_length_is_checked() {
        assert!(SdkSigner::from_seed(&[0u8; 8], LiquidNetwork::Testnet).is_err());
        assert!(SdkSigner::from_seed(&[0u8; 65], LiquidNetwork::Testnet).is_err());
        assert!(SdkSigner::from_seed(&[1u8; 32], LiquidNetwork::Testnet).is_ok());
    }
}
