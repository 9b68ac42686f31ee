use {
    alloy::{
        dyn_abi::{JsonAbiExt, Specifier},
        json_abi::JsonAbi,
        primitives::{Address, Bytes},
    },
    anyhow::{Context, Result},
};

/// A contract instance living at `address`.
#[derive(Clone, Debug)]
pub struct DeployedContract {
    address: Address,
    abi: JsonAbi,
}

impl DeployedContract {
    pub fn new(address: Address, abi: JsonAbi) -> Self {
        Self { address, abi }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Encodes the calldata of calling function `name` with `args`.
    ///
    /// Arguments are given in their textual form and get coerced into the
    /// types the ABI declares, so e.g. `"10"` works for any integer width.
    /// Overloads are resolved by the number of arguments.
    pub fn encode_call(&self, name: &str, args: &[&str]) -> Result<Bytes> {
        let function = self
            .abi
            .function(name)
            .into_iter()
            .flatten()
            .find(|function| function.inputs.len() == args.len())
            .with_context(|| {
                format!(
                    "contract has no function {name} taking {} argument(s)",
                    args.len()
                )
            })?;

        let values = function
            .inputs
            .iter()
            .zip(args)
            .map(|(param, arg)| {
                let ty = param
                    .resolve()
                    .with_context(|| format!("unsupported parameter type {}", param.ty))?;
                ty.coerce_str(arg)
                    .with_context(|| format!("{arg:?} is not a valid {}", param.ty))
            })
            .collect::<Result<Vec<_>>>()?;

        let calldata = function
            .abi_encode_input(&values)
            .with_context(|| format!("failed to encode call to {}", function.signature()))?;
        Ok(calldata.into())
    }
}
