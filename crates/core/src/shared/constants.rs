/// Model family table. Index positions match the control-plane model
/// selector (0..=6).
pub const MODEL_NAMES: [&str; 7] = [
    "yolox-tiny",
    "yolox-nano",
    "yolox-s",
    "yolox-m",
    "yolox-l",
    "yolox-x",
    "yolox-darknet",
];

/// Square input resolution each model variant expects.
pub const TARGET_SIZES: [u32; 7] = [416, 416, 640, 640, 640, 640, 640];

/// Per-channel normalization means (ImageNet statistics scaled to 0..255),
/// shared by the whole family.
pub const MEAN_VALS: [f32; 3] = [255.0 * 0.485, 255.0 * 0.456, 255.0 * 0.406];

/// Per-channel normalization scales, shared by the whole family.
pub const NORM_VALS: [f32; 3] = [
    1.0 / (255.0 * 0.229),
    1.0 / (255.0 * 0.224),
    1.0 / (255.0 * 0.225),
];

/// Base URL for downloadable model weight assets.
pub const MODEL_BASE_URL: &str =
    "https://raw.githubusercontent.com/nihui/ncnn-assets/master/models";

/// FPS estimator measurement window.
pub const FPS_WINDOW_MS: u64 = 1000;

/// Score emitted on the delegate notification channel. The upstream
/// notification path never computed a real confidence; this stays a
/// documented stub value.
pub const DELEGATE_PLACEHOLDER_SCORE: i32 = 0;

/// File extensions recognized by the image-directory capture source.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// COCO class labels, indexed by detection class id.
pub const CLASS_LABELS: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];
