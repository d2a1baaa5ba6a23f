//! Convolutional pose regression network.

use burn::module::Module;
use burn::nn;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::PaddingConfig2d;
use burn::prelude::Backend;
use burn::tensor::activation::relu;
use burn::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// Configuration for [`PoseNet`].
///
/// # Example
///
/// ```
/// use pose_models::PoseNetConfig;
///
/// let config = PoseNetConfig::new(14);
/// assert_eq!(config.num_joints, 14);
/// assert_eq!(config.input_size, 227);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseNetConfig {
    /// Number of joints the network regresses.
    pub num_joints: usize,

    /// Side length of the square RGB input, in pixels.
    pub input_size: usize,
}

impl PoseNetConfig {
    /// Creates a configuration with the standard 227px input.
    #[must_use]
    pub const fn new(num_joints: usize) -> Self {
        Self {
            num_joints,
            input_size: 227,
        }
    }

    /// Sets the input side length.
    #[must_use]
    pub const fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Side length of the feature map after the convolutional stack.
    ///
    /// Mirrors the floor arithmetic of each conv/pool layer. Zero means
    /// the input is too small for the stack.
    #[must_use]
    pub const fn feature_map_size(&self) -> usize {
        let n = self.input_size;
        if n < 11 {
            return 0;
        }
        let conv1 = (n - 11) / 4 + 1;
        if conv1 < 3 {
            return 0;
        }
        let pool1 = (conv1 - 3) / 2 + 1;
        if pool1 < 3 {
            return 0;
        }
        let pool2 = (pool1 - 3) / 2 + 1;
        if pool2 < 3 {
            return 0;
        }
        (pool2 - 3) / 2 + 1
    }

    /// Validates the configuration.
    ///
    /// Returns `true` if the joint count is positive and the input is
    /// large enough to survive the convolutional stack.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.num_joints >= 1 && self.feature_map_size() >= 1
    }
}

impl Default for PoseNetConfig {
    fn default() -> Self {
        Self::new(14)
    }
}

/// An AlexNet-style regressor mapping an RGB image to joint coordinates.
///
/// Five convolutions with interleaved max-pooling feed three fully
/// connected layers; the final layer emits `2 * num_joints` values, an
/// `(x, y)` pair per joint in input pixel space.
///
/// # Type Parameters
///
/// - `B`: The Burn backend (e.g., `NdArray`, `Wgpu`)
///
/// # Example
///
/// ```ignore
/// use pose_models::{PoseNet, PoseNetConfig};
///
/// let config = PoseNetConfig::new(14);
/// let device = Default::default();
/// let model = PoseNet::<MyBackend>::new(config, &device);
///
/// let input = Tensor::zeros([1, 3, 227, 227], &device);
/// let coords = model.predict(input);
/// assert_eq!(coords.dims(), [1, 14, 2]);
/// ```
#[derive(Debug, Module)]
pub struct PoseNet<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    conv3: Conv2d<B>,
    conv4: Conv2d<B>,
    conv5: Conv2d<B>,
    pool: MaxPool2d,
    fc6: nn::Linear<B>,
    fc7: nn::Linear<B>,
    fc8: nn::Linear<B>,
    num_joints: usize,
    input_size: usize,
}

impl<B: Backend> PoseNet<B> {
    /// Creates a new pose network with randomly initialized weights.
    ///
    /// # Arguments
    ///
    /// - `config`: Model configuration (must be valid)
    /// - `device`: The device to create the model on
    #[must_use]
    pub fn new(config: PoseNetConfig, device: &B::Device) -> Self {
        let feature = config.feature_map_size();
        let flattened = 256 * feature * feature;

        let conv1 = Conv2dConfig::new([3, 96], [11, 11])
            .with_stride([4, 4])
            .init(device);
        let conv2 = Conv2dConfig::new([96, 256], [5, 5])
            .with_padding(PaddingConfig2d::Explicit(2, 2))
            .init(device);
        let conv3 = Conv2dConfig::new([256, 384], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let conv4 = Conv2dConfig::new([384, 384], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let conv5 = Conv2dConfig::new([384, 256], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let pool = MaxPool2dConfig::new([3, 3]).with_strides([2, 2]).init();
        let fc6 = nn::LinearConfig::new(flattened, 4096).init(device);
        let fc7 = nn::LinearConfig::new(4096, 4096).init(device);
        let fc8 = nn::LinearConfig::new(4096, 2 * config.num_joints).init(device);

        Self {
            conv1,
            conv2,
            conv3,
            conv4,
            conv5,
            pool,
            fc6,
            fc7,
            fc8,
            num_joints: config.num_joints,
            input_size: config.input_size,
        }
    }

    /// Returns the number of joints the network regresses.
    #[must_use]
    pub const fn num_joints(&self) -> usize {
        self.num_joints
    }

    /// Returns the expected input side length in pixels.
    #[must_use]
    pub const fn input_size(&self) -> usize {
        self.input_size
    }

    /// Runs the forward pass.
    ///
    /// # Arguments
    ///
    /// - `input`: Tensor of shape `[batch, 3, input_size, input_size]`
    ///
    /// # Returns
    ///
    /// Flattened coordinates of shape `[batch, 2 * num_joints]`.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.pool.forward(relu(self.conv1.forward(input)));
        let x = self.pool.forward(relu(self.conv2.forward(x)));
        let x = relu(self.conv3.forward(x));
        let x = relu(self.conv4.forward(x));
        let x = self.pool.forward(relu(self.conv5.forward(x)));

        let x = x.flatten::<2>(1, 3);
        let x = relu(self.fc6.forward(x));
        let x = relu(self.fc7.forward(x));
        self.fc8.forward(x)
    }

    /// Runs inference and reshapes the output to one `(x, y)` row per
    /// joint.
    ///
    /// # Returns
    ///
    /// Tensor of shape `[batch, num_joints, 2]`.
    pub fn predict(&self, input: Tensor<B, 4>) -> Tensor<B, 3> {
        let out = self.forward(input);
        let [batch, _] = out.dims();
        out.reshape([batch, self.num_joints, 2])
    }
}
